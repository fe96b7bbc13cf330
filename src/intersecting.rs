//! Intersecting placement: backtracking search for an exact arrangement.
//!
//! The search places one word per recursion level, always choosing the most
//! constrained remaining word (fewest legal spots, with longer words and
//! higher achievable overlap breaking ties). Spots are tried in overlap
//! order so heavily-crossing arrangements are reached first; equal overlaps
//! are split by the session tie-breaker. After every commit the grid is
//! rescanned and branches where any word occurs more often than requested
//! are cut.
//!
//! A branch with every word on the board becomes a solution only if the
//! remaining empty cells can be filled without disturbing any occurrence
//! count; that fill is itself a small backtracking search over the alphabet.
//! Within its iteration budget the search is exhaustive: it keeps the
//! highest-scoring completed solution rather than stopping at the first, and
//! remembers the deepest partial arrangement as a fallback for cancellation.

use crate::errors::GenerateError;
use crate::generator::{fill_uniform, PlacementStrategy, Puzzle, Session, TieBreaker};
use crate::grid::Grid;
use crate::placement::{Direction, Placement};
use crate::wordlist::{PuzzleInput, Word};
use log::{debug, warn};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// How often the search reports progress, in iterations.
const PROGRESS_INTERVAL: u64 = 1_000;

pub(crate) struct IntersectingPlacement;

impl PlacementStrategy for IntersectingPlacement {
    fn generate(&self, input: &PuzzleInput, session: &mut Session) -> Result<Puzzle, GenerateError> {
        // Fast path for the one provably-unsatisfiable input shape.
        if let Some((letter, required)) = input.single_letter_conflict() {
            return Err(GenerateError::SingleLetterSaturation {
                letter,
                required,
                cells: input.width * input.height,
            });
        }

        let mut search = Search::new(input, session);
        let all: Vec<usize> = (0..input.words.len()).collect();
        search.explore(&all);

        let Search {
            best,
            best_partial,
            cancelled,
            iterations,
            ..
        } = search;
        debug!("search finished after {iterations} iteration(s) (cancelled: {cancelled})");

        if let Some(solved) = best {
            return Ok(Puzzle {
                grid: solved.grid,
                placements: solved.placed.into_iter().flatten().collect(),
                partial: false,
            });
        }

        if cancelled {
            if let Some(partial) = best_partial {
                warn!(
                    "iteration budget exhausted; keeping best partial ({} of {} words placed)",
                    partial.placed_count,
                    input.words.len()
                );
                let mut grid = partial.grid;
                fill_uniform(&mut grid, &input.alphabet, &mut session.rng);
                return Ok(Puzzle {
                    grid,
                    placements: partial.placed.into_iter().flatten().collect(),
                    partial: true,
                });
            }
            return Err(GenerateError::BudgetExhausted {
                max_iterations: session.max_iterations,
            });
        }

        Err(GenerateError::Infeasible {
            width: input.width,
            height: input.height,
            iterations,
        })
    }
}

/// A legal spot for one word, scored by how many cells it shares with
/// letters already on the board.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    row: usize,
    col: usize,
    dir: Direction,
    overlap: u32,
}

/// One distinct word text with its requested occurrence count.
struct UniqueWord {
    text: String,
    letters: Vec<char>,
    required: usize,
}

/// A completed, filled solution.
struct Solved {
    grid: Grid,
    placed: Vec<Option<Placement>>,
    score: u32,
}

/// Deepest arrangement seen so far, kept for budget cancellation.
struct PartialState {
    grid: Grid,
    placed: Vec<Option<Placement>>,
    placed_count: usize,
    score: u32,
}

struct Search<'a> {
    input: &'a PuzzleInput,
    session: &'a mut Session,
    grid: Grid,
    placed: Vec<Option<Placement>>,
    score: u32,
    iterations: u64,
    cancelled: bool,
    best: Option<Solved>,
    best_partial: Option<PartialState>,
    /// Distinct word texts in sorted order; occurrence counts index into this.
    unique: Vec<UniqueWord>,
    /// (word length, distinct words of that length), ascending by length.
    length_counts: Vec<(usize, usize)>,
}

impl<'a> Search<'a> {
    fn new(input: &'a PuzzleInput, session: &'a mut Session) -> Search<'a> {
        let mut unique: Vec<UniqueWord> = input
            .required
            .iter()
            .map(|(text, &required)| UniqueWord {
                letters: text.chars().collect(),
                text: text.clone(),
                required,
            })
            .collect();
        // The map has no deterministic order; the search does.
        unique.sort_by(|a, b| a.text.cmp(&b.text));

        let mut length_counts: BTreeMap<usize, usize> = BTreeMap::new();
        for word in &unique {
            *length_counts.entry(word.letters.len()).or_insert(0) += 1;
        }

        Search {
            input,
            session,
            grid: Grid::new(input.width, input.height),
            placed: vec![None; input.words.len()],
            score: 0,
            iterations: 0,
            cancelled: false,
            best: None,
            best_partial: None,
            unique,
            length_counts: length_counts.into_iter().collect(),
        }
    }

    /// One search call per word choice; the iteration budget counts these.
    fn explore(&mut self, remaining: &[usize]) {
        self.iterations += 1;
        if self.iterations > self.session.max_iterations {
            self.cancelled = true;
            return;
        }
        self.report_progress();

        if remaining.is_empty() {
            self.finalize();
            return;
        }

        let Some((chosen_idx, mut candidates)) = self.choose_word(remaining) else {
            // Some remaining word has no legal spot left. Letters only
            // accumulate within a branch, so the branch is dead.
            return;
        };
        self.order_candidates(self.input.words[chosen_idx].len(), &mut candidates);

        let rest: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&idx| idx != chosen_idx)
            .collect();

        for candidate in candidates {
            if self.cancelled {
                return;
            }
            let word = &self.input.words[chosen_idx];
            let written = self
                .grid
                .write_word(&word.letters, candidate.row, candidate.col, candidate.dir);
            self.placed[chosen_idx] = Some(Placement {
                word: word.text.clone(),
                row: candidate.row,
                col: candidate.col,
                dir: candidate.dir,
            });
            self.score += candidate.overlap;

            // A commit can complete a stray occurrence of some other word;
            // such branches can never reach exact counts again.
            if !self.overcommitted() {
                self.note_partial();
                self.explore(&rest);
            }

            self.score -= candidate.overlap;
            self.placed[chosen_idx] = None;
            self.grid.erase(&written);
        }
    }

    /// Picks the most constrained remaining word and its candidate spots.
    ///
    /// Returns `None` when any remaining word has zero candidates.
    fn choose_word(&self, remaining: &[usize]) -> Option<(usize, Vec<Candidate>)> {
        let mut chosen: Option<(usize, Vec<Candidate>, (usize, Reverse<usize>, Reverse<u32>))> =
            None;
        for &idx in remaining {
            let word = &self.input.words[idx];
            let candidates = self.candidates_for(word);
            if candidates.is_empty() {
                return None;
            }
            let best_overlap = candidates.iter().map(|c| c.overlap).max().unwrap_or(0);
            let key = (candidates.len(), Reverse(word.len()), Reverse(best_overlap));
            let replace = match &chosen {
                None => true,
                // Strict comparison keeps the earliest word on full ties.
                Some((_, _, current)) => key < *current,
            };
            if replace {
                chosen = Some((idx, candidates, key));
            }
        }
        chosen.map(|(idx, candidates, _)| (idx, candidates))
    }

    /// Every legal spot for `word`, horizontal first, row-major within a
    /// direction. Single-letter words get no vertical spots; a vertical
    /// single letter is the same cell again.
    fn candidates_for(&self, word: &Word) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for dir in [Direction::Horizontal, Direction::Vertical] {
            if dir == Direction::Vertical && word.len() == 1 {
                continue;
            }
            for row in 0..self.grid.height() {
                for col in 0..self.grid.width() {
                    if let Some(overlap) = self.grid.fits(&word.letters, row, col, dir) {
                        candidates.push(Candidate { row, col, dir, overlap });
                    }
                }
            }
        }
        candidates
    }

    /// Sorts candidates best-first: overlap descending, then the session
    /// tie-breaker (a fresh random draw per spot, or distance from the grid
    /// center to the spot's midpoint). The sort is stable, so whatever the
    /// keys leave tied stays in enumeration order.
    fn order_candidates(&mut self, word_len: usize, candidates: &mut Vec<Candidate>) {
        let mut keyed: Vec<(Candidate, f64)> = candidates
            .drain(..)
            .map(|candidate| {
                let key = match self.session.tie_breaker {
                    TieBreaker::Random => self.session.rng.next_f64(),
                    TieBreaker::Center => self.center_distance(&candidate, word_len),
                };
                (candidate, key)
            })
            .collect();
        keyed.sort_by(|a, b| b.0.overlap.cmp(&a.0.overlap).then(a.1.total_cmp(&b.1)));
        candidates.extend(keyed.into_iter().map(|(candidate, _)| candidate));
    }

    /// Squared distance from the grid center to the candidate's middle cell.
    fn center_distance(&self, candidate: &Candidate, word_len: usize) -> f64 {
        let half = (word_len - 1) / 2;
        let (mid_row, mid_col) = match candidate.dir {
            Direction::Horizontal => (candidate.row, candidate.col + half),
            Direction::Vertical => (candidate.row + half, candidate.col),
        };
        let center_row = (self.input.height - 1) as f64 / 2.0;
        let center_col = (self.input.width - 1) as f64 / 2.0;
        let d_row = mid_row as f64 - center_row;
        let d_col = mid_col as f64 - center_col;
        d_row * d_row + d_col * d_col
    }

    fn overcommitted(&self) -> bool {
        self.unique
            .iter()
            .any(|word| self.grid.count_occurrences_in(&word.letters) > word.required)
    }

    /// Records the current arrangement if it places more words (or the same
    /// number at a higher score) than the best partial so far.
    fn note_partial(&mut self) {
        let placed_count = self.placed.iter().filter(|p| p.is_some()).count();
        let better = match &self.best_partial {
            None => true,
            Some(current) => {
                placed_count > current.placed_count
                    || (placed_count == current.placed_count && self.score > current.score)
            }
        };
        if better {
            self.best_partial = Some(PartialState {
                grid: self.grid.clone(),
                placed: self.placed.clone(),
                placed_count,
                score: self.score,
            });
        }
    }

    /// Every word is on the board: verify exact counts, fill the leftover
    /// cells, and keep the result when it beats the best solution so far.
    fn finalize(&mut self) {
        if !self.counts_exact(&self.grid) {
            return;
        }
        // Equal scores keep the earlier solution; only a strictly better
        // arrangement is worth a fill attempt.
        if let Some(best) = &self.best {
            if best.score >= self.score {
                return;
            }
        }
        let mut grid = self.grid.clone();
        if !self.fill_remaining(&mut grid) {
            return;
        }
        debug_assert!(grid.is_complete(), "fill left an empty cell");
        debug_assert!(self.counts_exact(&grid), "fill broke an occurrence count");
        debug!(
            "solution found at iteration {}: score {}",
            self.iterations, self.score
        );
        self.best = Some(Solved {
            grid,
            placed: self.placed.clone(),
            score: self.score,
        });
    }

    fn counts_exact(&self, grid: &Grid) -> bool {
        self.unique
            .iter()
            .all(|word| grid.count_occurrences_in(&word.letters) == word.required)
    }

    /// Fills every empty cell without changing any word's occurrence count.
    ///
    /// Cells are attempted most-constrained first (more count windows pass
    /// through them); letters are tried in a shuffled order per cell. Returns
    /// false when no assignment works.
    fn fill_remaining(&mut self, grid: &mut Grid) -> bool {
        let mut cells = grid.empty_cells();
        if cells.is_empty() {
            return true;
        }
        let weights: HashMap<(usize, usize), u64> = cells
            .iter()
            .map(|&(row, col)| ((row, col), self.cell_weight(row, col)))
            .collect();
        cells.sort_by_key(|&(row, col)| (Reverse(weights[&(row, col)]), row, col));

        let mut counts: Vec<usize> = self
            .unique
            .iter()
            .map(|word| grid.count_occurrences_in(&word.letters))
            .collect();
        self.fill_cell(grid, &cells, 0, &mut counts)
    }

    fn fill_cell(
        &mut self,
        grid: &mut Grid,
        cells: &[(usize, usize)],
        depth: usize,
        counts: &mut [usize],
    ) -> bool {
        let Some(&(row, col)) = cells.get(depth) else {
            return true;
        };
        let mut letters = self.input.alphabet.clone();
        self.session.rng.shuffle(&mut letters);
        for letter in letters {
            let Some(deltas) = self.try_letter(grid, row, col, letter, counts) else {
                continue;
            };
            if self.fill_cell(grid, cells, depth + 1, counts) {
                return true;
            }
            for &(idx, delta) in &deltas {
                counts[idx] -= delta;
            }
            grid.clear(row, col);
        }
        false
    }

    /// Writes `letter` at `(row, col)` if no word overshoots its required
    /// count, returning the per-word occurrence deltas it caused. The cell is
    /// left cleared when the letter is rejected.
    fn try_letter(
        &self,
        grid: &mut Grid,
        row: usize,
        col: usize,
        letter: char,
        counts: &mut [usize],
    ) -> Option<Vec<(usize, usize)>> {
        grid.set(row, col, letter);
        let mut deltas = Vec::new();
        for (idx, word) in self.unique.iter().enumerate() {
            let delta = completed_windows(grid, &word.letters, row, col);
            if delta == 0 {
                continue;
            }
            if counts[idx] + delta > word.required {
                grid.clear(row, col);
                return None;
            }
            deltas.push((idx, delta));
        }
        for &(idx, delta) in &deltas {
            counts[idx] += delta;
        }
        Some(deltas)
    }

    /// How many occurrence-count windows pass through `(row, col)`, summed
    /// over the distinct word lengths in play. Higher means the cell is
    /// harder to fill and should be attempted earlier.
    fn cell_weight(&self, row: usize, col: usize) -> u64 {
        let mut weight = 0u64;
        for &(len, n) in &self.length_counts {
            weight += windows_through(col, self.input.width, len) * n as u64;
            if len > 1 {
                weight += windows_through(row, self.input.height, len) * n as u64;
            }
        }
        weight
    }

    fn report_progress(&mut self) {
        if self.iterations % PROGRESS_INTERVAL == 0 {
            let fraction = (self.iterations as f64 / self.session.max_iterations as f64).min(1.0);
            self.session.progress(fraction);
        }
    }
}

/// Number of length-`len` windows along an axis of `size` that contain
/// position `pos`.
fn windows_through(pos: usize, size: usize, len: usize) -> u64 {
    debug_assert!(len > 0, "zero-length window");
    if len > size {
        return 0;
    }
    let lo = pos.saturating_sub(len - 1);
    let hi = pos.min(size - len);
    if hi >= lo {
        (hi - lo + 1) as u64
    } else {
        0
    }
}

/// Windows through `(row, col)` that fully match `letters`. Called right
/// after a cell is written: any matching window through it is newly complete,
/// because a window over a previously-empty cell cannot have matched.
fn completed_windows(grid: &Grid, letters: &[char], row: usize, col: usize) -> usize {
    let len = letters.len();
    let mut completed = 0;
    if len <= grid.width() {
        let lo = col.saturating_sub(len - 1);
        let hi = col.min(grid.width() - len);
        for start in lo..=hi {
            if grid.window_matches(letters, row, start, Direction::Horizontal) {
                completed += 1;
            }
        }
    }
    if len > 1 && len <= grid.height() {
        let lo = row.saturating_sub(len - 1);
        let hi = row.min(grid.height() - len);
        for start in lo..=hi {
            if grid.window_matches(letters, start, col, Direction::Vertical) {
                completed += 1;
            }
        }
    }
    completed
}
