use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use std::time::Instant;

use wordgrid::errors::GenerateError;
use wordgrid::generator::{self, GenerateOptions, ProgressFn, Strategy, TieBreaker};
use wordgrid::rng::Seed;
use wordgrid::wordlist;

/// Word-search puzzle generator
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH_FULL"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// Words to hide in the grid
    #[arg(required_unless_present = "words_file")]
    words: Vec<String>,

    /// Read words from a file instead (one per line, '#' comments allowed)
    #[arg(short = 'f', long)]
    words_file: Option<String>,

    /// Extra filler letters beyond the letters of the words
    #[arg(short, long, value_delimiter = ',')]
    letters: Vec<String>,

    /// Grid width
    #[arg(short = 'W', long, default_value_t = 12)]
    width: usize,

    /// Grid height
    #[arg(short = 'H', long, default_value_t = 12)]
    height: usize,

    /// Placement strategy
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Intersecting)]
    strategy: StrategyArg,

    /// Reproducibility seed (a number, or any text)
    #[arg(long)]
    seed: Option<String>,

    /// How the intersecting search breaks ties between equally-good spots
    #[arg(short, long, value_enum, default_value_t = TieBreakerArg::Random)]
    tie_breaker: TieBreakerArg,

    /// Iteration budget for the intersecting search
    #[arg(short = 'i', long, default_value_t = generator::DEFAULT_MAX_ITERATIONS)]
    max_iterations: u64,

    /// Report search progress on stderr
    #[arg(long)]
    progress: bool,

    /// List word placements after the grid
    #[arg(short = 'p', long)]
    show_placements: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Greedy placement; words that no longer fit are dropped
    Free,
    /// Backtracking search for a fully-crossed grid
    Intersecting,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Free => Strategy::Free,
            StrategyArg::Intersecting => Strategy::Intersecting,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TieBreakerArg {
    /// Shuffle tied spots
    Random,
    /// Prefer spots near the grid center
    Center,
}

impl From<TieBreakerArg> for TieBreaker {
    fn from(arg: TieBreakerArg) -> Self {
        match arg {
            TieBreakerArg::Random => TieBreaker::Random,
            TieBreakerArg::Center => TieBreaker::Center,
        }
    }
}

/// Entry point of the wordgrid CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("WORDGRID_DEBUG").is_ok();
    wordgrid::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        // Print the error message to stderr, with detailed formatting if it's a GenerateError
        if let Some(gen_err) = e.downcast_ref::<GenerateError>() {
            eprintln!("Error: {}", gen_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the wordgrid CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Assemble the word list (positional words, or a file with -f).
/// 3. Generate the puzzle.
/// 4. Print the grid (and optionally the placements) on stdout.
/// 5. Print diagnostics (placement summary, timing) on stderr.
///
/// Returns `Ok(())` on success or an error (e.g., invalid dimensions,
/// missing words file, unsatisfiable puzzle) which bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // 1. Assemble the word list
    let words: Vec<String> = match &cli.words_file {
        Some(path) => wordlist::load_words_from_path(path)?,
        None => cli.words.clone(),
    };
    let words_ref: Vec<&str> = words.iter().map(String::as_str).collect();
    let letters_ref: Vec<&str> = cli.letters.iter().map(String::as_str).collect();

    let on_progress: Option<ProgressFn> = if cli.progress {
        Some(Box::new(|fraction: f64| {
            eprintln!("progress: {:.0}%", fraction * 100.0);
        }))
    } else {
        None
    };

    // 2. Generate the puzzle
    let options = GenerateOptions {
        strategy: cli.strategy.into(),
        seed: cli.seed.as_deref().map(Seed::parse),
        tie_breaker: cli.tie_breaker.into(),
        max_iterations: cli.max_iterations,
        on_progress,
    };
    let t_generate = Instant::now();
    let puzzle = generator::generate(&words_ref, &letters_ref, cli.width, cli.height, options)?;
    let generate_secs = t_generate.elapsed().as_secs_f64();

    // 3. Print the grid on stdout
    println!("{}", puzzle.grid);

    // 4. Optionally list where each word landed
    if cli.show_placements {
        println!();
        for placement in &puzzle.placements {
            println!("{placement}");
        }
    }

    // 5. Diagnostics (placement summary, timing) to stderr
    if puzzle.partial {
        eprintln!(
            "⚠️  Partial result: placed {}/{} words",
            puzzle.placements.len(),
            words_ref.len()
        );
    } else {
        eprintln!("✓ Placed all {} word(s)", puzzle.placements.len());
    }
    eprintln!(
        "Generated {}x{} grid in {:.3}s.",
        cli.width, cli.height, generate_secs
    );

    Ok(())
}
