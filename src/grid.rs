use crate::placement::Direction;
use std::fmt;

/// Rendering for a cell that was never written.
pub const EMPTY_CELL: char = '.';

/// The puzzle board: a `width` x `height` matrix of optional letters.
///
/// Cells are `None` until a word or the filler writes them. All coordinates
/// are `(row, col)` with `(0, 0)` at the top-left. Mutation is paired
/// throughout the crate: every `write_word` has a matching `erase` of the
/// cells it reported, so backtracking never disturbs letters written by an
/// earlier placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Grid {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        row * self.width + col
    }

    /// Letter at `(row, col)`, or `None` for an unwritten cell.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells[self.idx(row, col)]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, letter: char) {
        let idx = self.idx(row, col);
        self.cells[idx] = Some(letter);
    }

    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        let idx = self.idx(row, col);
        self.cells[idx] = None;
    }

    /// True once every cell holds a letter.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Unwritten cells in row-major order.
    pub(crate) fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.get(row, col).is_none() {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// Checks whether `letters` can start at `(row, col)` reading along `dir`.
    ///
    /// Returns `None` when the word would run off the board or collide with a
    /// different letter, and `Some(overlap)` otherwise, where `overlap` counts
    /// the cells already holding the matching letter.
    pub(crate) fn fits(&self, letters: &[char], row: usize, col: usize, dir: Direction) -> Option<u32> {
        debug_assert!(!letters.is_empty(), "fits requires a non-empty word");
        let (d_row, d_col) = dir.step();
        // Checking the final cell covers the start cell too.
        let end_row = row + (letters.len() - 1) * d_row;
        let end_col = col + (letters.len() - 1) * d_col;
        if end_row >= self.height || end_col >= self.width {
            return None;
        }
        let mut overlap = 0;
        for (i, &letter) in letters.iter().enumerate() {
            match self.get(row + i * d_row, col + i * d_col) {
                None => {}
                Some(existing) if existing == letter => overlap += 1,
                Some(_) => return None,
            }
        }
        Some(overlap)
    }

    /// Writes `letters` into the grid starting at `(row, col)`.
    ///
    /// Only previously-empty cells are touched; the returned list names
    /// exactly those cells so the caller can undo this write with [`erase`]
    /// without clearing letters that belong to other placements.
    ///
    /// [`erase`]: Grid::erase
    pub(crate) fn write_word(
        &mut self,
        letters: &[char],
        row: usize,
        col: usize,
        dir: Direction,
    ) -> Vec<(usize, usize)> {
        debug_assert!(
            self.fits(letters, row, col, dir).is_some(),
            "write_word requires a legal spot"
        );
        let (d_row, d_col) = dir.step();
        let mut written = Vec::new();
        for (i, &letter) in letters.iter().enumerate() {
            let (r, c) = (row + i * d_row, col + i * d_col);
            if self.get(r, c).is_none() {
                self.set(r, c, letter);
                written.push((r, c));
            }
        }
        written
    }

    /// Clears the cells previously reported by [`write_word`].
    ///
    /// [`write_word`]: Grid::write_word
    pub(crate) fn erase(&mut self, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            debug_assert!(self.get(row, col).is_some(), "erase expects a written cell");
            self.clear(row, col);
        }
    }

    /// Counts how many times `word` reads in the grid.
    ///
    /// Horizontal windows are scanned on every row; vertical windows only for
    /// words of two or more letters, so a single letter in a cell counts as
    /// one occurrence rather than two. Windows containing an empty cell never
    /// match.
    #[must_use]
    pub fn count_occurrences(&self, word: &str) -> usize {
        let letters: Vec<char> = word.chars().collect();
        self.count_occurrences_in(&letters)
    }

    pub(crate) fn count_occurrences_in(&self, letters: &[char]) -> usize {
        let len = letters.len();
        if len == 0 {
            return 0;
        }
        let mut count = 0;
        if len <= self.width {
            for row in 0..self.height {
                for col in 0..=(self.width - len) {
                    if self.window_matches(letters, row, col, Direction::Horizontal) {
                        count += 1;
                    }
                }
            }
        }
        if len > 1 && len <= self.height {
            for col in 0..self.width {
                for row in 0..=(self.height - len) {
                    if self.window_matches(letters, row, col, Direction::Vertical) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// True when every window cell holds the corresponding letter.
    pub(crate) fn window_matches(&self, letters: &[char], row: usize, col: usize, dir: Direction) -> bool {
        let (d_row, d_col) = dir.step();
        letters
            .iter()
            .enumerate()
            .all(|(i, &letter)| self.get(row + i * d_row, col + i * d_col) == Some(letter))
    }

    /// The grid as one string per row, empty cells rendered as [`EMPTY_CELL`].
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| self.get(row, col).unwrap_or(EMPTY_CELL))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows().join("\n"))
    }
}
