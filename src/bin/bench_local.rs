//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of puzzle shapes on *your* machine.
//! - Runs each case several times and reports the median.
//! - All cases share one seed (default 42) so repeats do identical work.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print the generated grids:      `cargo run --bin bench_local --release -- -p`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Use the same machine and `--release` for more comparable numbers.
//! - Word sets and board shapes live in `get_cases()` below.
//! - I/O (printing) is kept outside the timed section.
//! - One warm-up run per case is done (not included in timing).
//! - We report the *median* over repeats (more robust than mean for small _N_).

use clap::Parser;
use std::hint::black_box;
use std::time::Instant;
use wordgrid::generator::{self, GenerateOptions, Strategy};
use wordgrid::rng::Seed;

/// Simple local benchmark runner: time puzzle generation for several shapes.
/// Each case is a word set + board shape + strategy; all runs share one seed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of repeats per case (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 3)]
    num_repeats: usize,

    /// Print each case's generated grid (outside the timed section)
    #[arg(short = 'p', long = "print-grids")]
    print_grids: bool,

    /// Seed shared by every case
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// A benchmark case: words to place, board shape, and strategy.
#[derive(Clone)]
struct Case {
    name: &'static str,
    words: &'static [&'static str],
    width: usize,
    height: usize,
    strategy: Strategy,
}

/// Edit/add new cases here. The summary displays `name`.
fn get_cases() -> Vec<Case> {
    vec![
        Case {
            name: "six animals, 10x10",
            words: &["CAT", "DOG", "BIRD", "HORSE", "MOUSE", "SHEEP"],
            width: 10,
            height: 10,
            strategy: Strategy::Intersecting,
        },
        Case {
            name: "six animals, 10x10, free",
            words: &["CAT", "DOG", "BIRD", "HORSE", "MOUSE", "SHEEP"],
            width: 10,
            height: 10,
            strategy: Strategy::Free,
        },
        Case {
            name: "crossing pair, 7x7",
            words: &["CROSS", "WORDS"],
            width: 7,
            height: 7,
            strategy: Strategy::Intersecting,
        },
        Case {
            name: "duplicate word, 8x8",
            words: &["ECHO", "ECHO"],
            width: 8,
            height: 8,
            strategy: Strategy::Intersecting,
        },
        Case {
            name: "eight themed words, 12x12",
            words: &[
                "PUZZLE", "SEARCH", "LETTER", "HIDDEN", "ACROSS", "BOTTOM", "RANDOM", "SAMPLE",
            ],
            width: 12,
            height: 12,
            strategy: Strategy::Intersecting,
        },
        // Note: many short words make for a wide search tree.
        Case {
            name: "six short words, 6x6",
            words: &["AB", "CD", "EF", "GH", "IJ", "KL"],
            width: 6,
            height: 6,
            strategy: Strategy::Intersecting,
        },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    // safe: f64 durations are never NaN in this context
    xs.sort_by(|a, b| a.partial_cmp(b).expect("f64 durations should not be NaN"));
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_NAME_LEN: usize = 32;

fn main() {
    /// One row in the benchmark summary: (case name, median seconds,
    /// words placed, grid size, strategy).
    type SummaryRow = (String, f64, usize, String, String);

    let cli = Cli::parse();

    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        eprintln!("\n[{:02}] {}", idx + 1, case.name);

        // One *warm-up* execution per case to "touch" code paths / caches.
        // We intentionally ignore its timing.
        if let Err(e) = generator::generate(
            case.words,
            &[],
            case.width,
            case.height,
            options_for(case, cli.seed),
        ) {
            eprintln!("  ✗ Warm-up failed: {}", e);
            continue;
        }

        // Repeat the timed runs and collect durations.
        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last_puzzle = None;

        for rep in 0..cli.num_repeats {
            let options = options_for(case, cli.seed);
            // Keep only the *core* operation inside the timed region.
            let t_generate = Instant::now();
            let puzzle = match generator::generate(
                black_box(case.words),
                &[],
                case.width,
                case.height,
                options,
            ) {
                Ok(puzzle) => puzzle,
                Err(e) => {
                    eprintln!("  ✗ Run {}/{} failed: {}", rep + 1, cli.num_repeats, e);
                    continue;
                }
            };
            let generate_secs = t_generate.elapsed().as_secs_f64();

            // Prevent the compiler from proving the result unused and eliding work.
            let _keep = black_box(puzzle.placements.len());

            times.push(generate_secs);
            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({} words placed)",
                rep + 1,
                cli.num_repeats,
                generate_secs,
                puzzle.placements.len()
            );
            last_puzzle = Some(puzzle);
        }

        let Some(puzzle) = last_puzzle else {
            continue;
        };

        // Prefer median for small N--it's less sensitive to noisy outliers.
        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(0.0, f64::max);
        let med = median(times);

        // Optionally print the last grid (outside timing).
        if cli.print_grids {
            println!("{}", puzzle.grid);
            println!();
        }

        eprintln!(
            "  → median {med:.3}s (min {min:.3}s, max {max:.3}s) over {} run(s); last run placed {} {}",
            cli.num_repeats,
            puzzle.placements.len(),
            pluralizer(puzzle.placements.len(), "word".into(), None)
        );

        summary.push((
            case.name.to_string(),
            med,
            puzzle.placements.len(),
            format!("{}x{}", case.width, case.height),
            format!("{:?}", case.strategy),
        ));
    }

    // Compact summary at the end for a quick scan across all cases.
    eprintln!("\n==== Summary ====");
    eprintln!(
        "{:<MAX_NAME_LEN$} | {:>10} | {:>6} | {:>7} | {:>12}",
        "case", "median (s)", "placed", "grid", "strategy"
    );
    eprintln!(
        "{:-<MAX_NAME_LEN$}-+-{:-<10}-+-{:-<6}-+-{:-<7}-+-{:-<12}",
        "", "", "", "", ""
    );
    for (name, med, placed, grid, strategy) in &summary {
        // Trim very long names for readability in the summary.
        let display = if name.len() > MAX_NAME_LEN {
            // "- 1" for the "…"
            format!("{}…", name.chars().take(MAX_NAME_LEN - 1).collect::<String>())
        } else {
            name.clone()
        };
        eprintln!(
            "{display:<MAX_NAME_LEN$} | {med:>10.3} | {placed:>6} | {grid:>7} | {strategy:>12}"
        );
    }
}

fn options_for(case: &Case, seed: u64) -> GenerateOptions {
    GenerateOptions {
        strategy: case.strategy,
        seed: Some(Seed::Number(seed)),
        ..GenerateOptions::default()
    }
}

fn pluralizer(count: usize, singular: String, plural: Option<String>) -> String {
    if count == 1 {
        singular
    } else {
        plural.unwrap_or_else(|| singular + "s")
    }
}
