use std::fmt;

/// Direction a word reads in the grid.
///
/// Only forward directions exist in this puzzle style: left-to-right or
/// top-to-bottom. No reverse, no diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Direction {
    /// Single-letter form used in placement listings.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Direction::Horizontal => 'H',
            Direction::Vertical => 'V',
        }
    }

    /// Row/column deltas for stepping along this direction.
    pub(crate) fn step(self) -> (usize, usize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A committed assignment of one word to a start cell and a direction.
///
/// Valid by construction: the generators only record a placement after
/// checking that every covered cell is empty or already holds the matching
/// letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The normalized (uppercase) word text.
    pub word: String,
    /// Row of the first letter.
    pub row: usize,
    /// Column of the first letter.
    pub col: usize,
    /// Reading direction from the start cell.
    pub dir: Direction,
}

impl Placement {
    /// Cells covered by this placement, in reading order.
    #[must_use]
    pub fn cells(&self) -> Vec<(usize, usize)> {
        let (d_row, d_col) = self.dir.step();
        (0..self.word.chars().count())
            .map(|i| (self.row + i * d_row, self.col + i * d_col))
            .collect()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {},{} {}", self.word, self.row, self.col, self.dir)
    }
}
