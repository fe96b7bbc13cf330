//! Error types for puzzle generation with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (G001-G006) for documentation lookup:
//!
//! - G001: `InvalidDimensions` (Zero grid width or height)
//! - G002: `NoLetters` (No words and no filler letters)
//! - G003: `WordTooLong` (Word longer than both grid axes)
//! - G004: `SingleLetterSaturation` (Single-letter puzzle with an impossible count)
//! - G005: `BudgetExhausted` (Iteration budget ran out with nothing placed)
//! - G006: `Infeasible` (Search space exhausted, no arrangement exists)
//!
//! # Examples
//!
//! ## Basic Error Handling
//!
//! ```
//! use wordgrid::errors::GenerateError;
//!
//! fn check_dimensions(width: usize, height: usize) -> Result<(), GenerateError> {
//!     if width == 0 || height == 0 {
//!         return Err(GenerateError::InvalidDimensions { width, height });
//!     }
//!     Ok(())
//! }
//!
//! match check_dimensions(0, 5) {
//!     Err(e) => {
//!         println!("Error: {e}");
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {help}");
//!         }
//!     }
//!     Ok(()) => println!("Success"),
//! }
//! ```
//!
//! ## Detailed Display
//!
//! ```
//! use wordgrid::errors::GenerateError;
//!
//! let err = GenerateError::WordTooLong {
//!     word: "BRACHIOSAURUS".to_string(),
//!     len: 13,
//!     grid_max: 10,
//! };
//! let detailed = err.display_detailed();
//! assert!(detailed.contains("G003"));
//! assert!(detailed.contains("BRACHIOSAURUS"));
//! ```

/// Errors reported by puzzle generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid grid dimensions: {width}x{height} (width and height must be at least 1)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("no letters to fill the grid: words and letters are both empty")]
    NoLetters,

    #[error("word \"{word}\" has {len} letters but the grid allows at most {grid_max}")]
    WordTooLong {
        word: String,
        len: usize,
        grid_max: usize,
    },

    #[error("single-letter alphabet: '{letter}' fills all {cells} cells but {required} occurrence(s) were requested")]
    SingleLetterSaturation {
        letter: char,
        required: usize,
        cells: usize,
    },

    #[error("iteration budget exhausted after {max_iterations} iterations without placing any word")]
    BudgetExhausted { max_iterations: u64 },

    #[error("words cannot all be placed in a {width}x{height} grid (search exhausted after {iterations} iterations)")]
    Infeasible {
        width: usize,
        height: usize,
        iterations: u64,
    },
}

impl GenerateError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::InvalidDimensions { .. } => "G001",
            GenerateError::NoLetters => "G002",
            GenerateError::WordTooLong { .. } => "G003",
            GenerateError::SingleLetterSaturation { .. } => "G004",
            GenerateError::BudgetExhausted { .. } => "G005",
            GenerateError::Infeasible { .. } => "G006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GenerateError::InvalidDimensions { .. } => "Grid width or height is zero",
            GenerateError::NoLetters => "No words and no filler letters were provided",
            GenerateError::WordTooLong { .. } => "A word is longer than both grid dimensions",
            GenerateError::SingleLetterSaturation { .. } => {
                "Single-letter puzzle with an impossible occurrence count"
            }
            GenerateError::BudgetExhausted { .. } => {
                "Iteration budget ran out before any word was placed"
            }
            GenerateError::Infeasible { .. } => "Search space exhausted with no valid arrangement",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GenerateError::InvalidDimensions { .. } => {
                "Both dimensions must be at least 1. A zero-width or zero-height grid has no cells to place words or filler letters into."
            }
            GenerateError::NoLetters => {
                "After trimming, every word was blank and no filler letters were supplied, leaving nothing to build the grid from. At least one non-blank word or one filler letter is required."
            }
            GenerateError::WordTooLong { .. } => {
                "Words read left-to-right or top-to-bottom, so every word must fit along the longer of the two grid axes. One requested word exceeds both."
            }
            GenerateError::SingleLetterSaturation { .. } => {
                "When the words and filler letters reduce to a single distinct letter, a completed grid necessarily repeats that letter in every cell, and the single-letter word then occurs exactly once per cell. Any other requested count is unsatisfiable, so the search is not attempted."
            }
            GenerateError::BudgetExhausted { .. } => {
                "The backtracking search hit its iteration ceiling before committing even one word placement, so there is no partial arrangement to fall back on. In practice this needs a budget near zero; once a word has been placed, running out of budget returns a partial puzzle instead."
            }
            GenerateError::Infeasible { .. } => {
                "Every combination of positions for the requested words was tried within the iteration budget and none produced a grid with the exact occurrence counts. The words genuinely cannot coexist in a grid of this size."
            }
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerateError::InvalidDimensions { .. } => {
                Some("Pass a width and height of at least 1 (e.g. 12x12)")
            }
            GenerateError::NoLetters => {
                Some("Provide at least one word, or at least one filler letter for a wordless grid")
            }
            GenerateError::WordTooLong { .. } => {
                Some("Enlarge the grid or drop the offending word (a 13-letter word needs a width or height of at least 13)")
            }
            GenerateError::SingleLetterSaturation { .. } => {
                Some("Add a second distinct letter, or size the grid so its cell count matches the requested copies")
            }
            GenerateError::BudgetExhausted { .. } => {
                Some("Raise max_iterations; the default of 50,000 handles most small grids")
            }
            GenerateError::Infeasible { .. } => {
                Some("Use a larger grid, remove a word, or switch to the free strategy, which drops unplaceable words instead of failing")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
