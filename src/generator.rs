//! Puzzle generation entry point and the strategy seam.
//!
//! [`generate`] validates the request, seeds the deterministic RNG, and hands
//! off to one of two placement strategies:
//!
//! - [`Strategy::Free`]: greedy longest-first placement. Never backtracks;
//!   when a word has no legal spot, it and every word after it are dropped
//!   and the result is marked partial.
//! - [`Strategy::Intersecting`]: exhaustive backtracking search that places
//!   every word exactly as many times as requested, preferring arrangements
//!   with many shared cells.
//!
//! Both strategies finish by filling the unused cells from the puzzle
//! alphabet so the final grid is completely lettered.
//!
//! # Examples
//!
//! ```
//! use wordgrid::generator::{generate, GenerateOptions, Strategy};
//!
//! let options = GenerateOptions {
//!     strategy: Strategy::Intersecting,
//!     ..GenerateOptions::default()
//! };
//! let puzzle = generate(&["cat"], &[], 3, 1, options).unwrap();
//! assert_eq!(puzzle.grid.rows(), vec!["CAT"]);
//! assert_eq!(puzzle.placements.len(), 1);
//! ```
//!
//! The same seed always reproduces the same puzzle:
//!
//! ```
//! use wordgrid::generator::{generate, GenerateOptions, Strategy};
//! use wordgrid::rng::Seed;
//!
//! let options = || GenerateOptions {
//!     strategy: Strategy::Intersecting,
//!     seed: Some(Seed::Number(1)),
//!     ..GenerateOptions::default()
//! };
//! let first = generate(&["cat", "dog"], &[], 3, 3, options()).unwrap();
//! let second = generate(&["cat", "dog"], &[], 3, 3, options()).unwrap();
//! assert_eq!(first.grid.rows(), second.grid.rows());
//! assert_eq!(first.grid.count_occurrences("CAT"), 1);
//! assert_eq!(first.grid.count_occurrences("DOG"), 1);
//! assert!(!first.partial);
//! ```

use crate::errors::GenerateError;
use crate::free::FreePlacement;
use crate::grid::Grid;
use crate::intersecting::IntersectingPlacement;
use crate::placement::Placement;
use crate::rng::{GridRng, Seed};
use crate::wordlist::PuzzleInput;
use log::debug;
use std::fmt;

/// Default iteration budget for the intersecting search.
pub const DEFAULT_MAX_ITERATIONS: u64 = 50_000;

/// Word placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Greedy placement without backtracking; unplaceable words are dropped.
    #[default]
    Free,
    /// Backtracking search for an exact, intersection-heavy arrangement.
    Intersecting,
}

/// How the intersecting search breaks ties between equally-overlapping spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreaker {
    /// Shuffle tied candidates with the session RNG.
    #[default]
    Random,
    /// Prefer spots whose midpoint sits closest to the grid center.
    Center,
}

/// Callback reporting search progress as a fraction in `[0, 1]`.
pub type ProgressFn = Box<dyn FnMut(f64)>;

/// Knobs for [`generate`]; `GenerateOptions::default()` matches the CLI
/// defaults except for the strategy.
pub struct GenerateOptions {
    pub strategy: Strategy,
    /// Reproducibility seed; `None` draws entropy from the operating system.
    pub seed: Option<Seed>,
    pub tie_breaker: TieBreaker,
    /// Iteration budget for the intersecting search; ignored by free.
    pub max_iterations: u64,
    pub on_progress: Option<ProgressFn>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            strategy: Strategy::default(),
            seed: None,
            tie_breaker: TieBreaker::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            on_progress: None,
        }
    }
}

impl fmt::Debug for GenerateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("strategy", &self.strategy)
            .field("seed", &self.seed)
            .field("tie_breaker", &self.tie_breaker)
            .field("max_iterations", &self.max_iterations)
            .field("on_progress", &self.on_progress.as_ref().map(|_| "FnMut(f64)"))
            .finish()
    }
}

/// A generated puzzle.
#[derive(Debug, Clone)]
pub struct Puzzle {
    /// The fully-lettered grid.
    pub grid: Grid,
    /// Where each placed word starts, in request order. Shorter than the
    /// request when `partial` is set.
    pub placements: Vec<Placement>,
    /// True when not every requested word made it into the grid.
    pub partial: bool,
}

/// Per-run state shared by both strategies.
pub(crate) struct Session {
    pub(crate) rng: GridRng,
    pub(crate) tie_breaker: TieBreaker,
    pub(crate) max_iterations: u64,
    on_progress: Option<ProgressFn>,
}

impl Session {
    pub(crate) fn new(options: GenerateOptions) -> Self {
        Session {
            rng: GridRng::new(options.seed.as_ref()),
            tie_breaker: options.tie_breaker,
            max_iterations: options.max_iterations,
            on_progress: options.on_progress,
        }
    }

    pub(crate) fn progress(&mut self, fraction: f64) {
        if let Some(callback) = self.on_progress.as_mut() {
            callback(fraction);
        }
    }
}

/// The seam between [`generate`] and the two placement algorithms.
pub(crate) trait PlacementStrategy {
    fn generate(&self, input: &PuzzleInput, session: &mut Session)
        -> Result<Puzzle, GenerateError>;
}

/// Generates a word-search puzzle.
///
/// `words` are placed reading left-to-right or top-to-bottom; `letters`
/// extend the alphabet used to fill cells no word covers. Inputs are trimmed
/// and uppercased, blank entries dropped, and duplicate words request
/// multiple appearances.
///
/// # Errors
///
/// Returns a [`GenerateError`] when the request is malformed (G001-G003),
/// provably unsatisfiable (G004, G006), or the iteration budget runs out
/// before anything is placed (G005).
pub fn generate(
    words: &[&str],
    letters: &[&str],
    width: usize,
    height: usize,
    options: GenerateOptions,
) -> Result<Puzzle, GenerateError> {
    // 1. Validate and normalize the request.
    let input = PuzzleInput::new(words, letters, width, height)?;
    debug!(
        "generating {}x{} puzzle: {} word(s), strategy {:?}",
        width,
        height,
        input.words.len(),
        options.strategy
    );

    // 2. Build the session state shared by both strategies. The strategy
    //    choice is read first because the options move into the session.
    let chosen = options.strategy;
    let mut session = Session::new(options);

    // 3. No words at all: the puzzle is pure filler.
    if input.words.is_empty() {
        let mut grid = Grid::new(width, height);
        fill_uniform(&mut grid, &input.alphabet, &mut session.rng);
        return Ok(Puzzle {
            grid,
            placements: Vec::new(),
            partial: false,
        });
    }

    // 4. Hand off to the chosen placement strategy.
    let strategy: &dyn PlacementStrategy = match chosen {
        Strategy::Free => &FreePlacement,
        Strategy::Intersecting => &IntersectingPlacement,
    };
    strategy.generate(&input, &mut session)
}

/// Fills every empty cell with a uniform draw from `alphabet`.
///
/// No occurrence checking here: this is the fallback fill for the free
/// strategy and for partial results, where extra accidental occurrences are
/// acceptable.
pub(crate) fn fill_uniform(grid: &mut Grid, alphabet: &[char], rng: &mut GridRng) {
    for (row, col) in grid.empty_cells() {
        let letter = alphabet[rng.index(alphabet.len())];
        grid.set(row, col, letter);
    }
}
