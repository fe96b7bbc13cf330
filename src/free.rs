//! Free placement: greedy, longest word first, no backtracking.
//!
//! Each word draws uniformly from its current legal spots. A word with no
//! legal spot ends placement early; it and every word still waiting are
//! dropped and the puzzle is marked partial. Free never reports a generation
//! failure beyond input validation.

use crate::errors::GenerateError;
use crate::generator::{fill_uniform, PlacementStrategy, Puzzle, Session};
use crate::grid::Grid;
use crate::placement::{Direction, Placement};
use crate::wordlist::{PuzzleInput, Word};
use log::warn;
use std::cmp::Reverse;

pub(crate) struct FreePlacement;

impl PlacementStrategy for FreePlacement {
    fn generate(&self, input: &PuzzleInput, session: &mut Session) -> Result<Puzzle, GenerateError> {
        // Longest words first; ties keep request order.
        let mut order: Vec<usize> = (0..input.words.len()).collect();
        order.sort_by_key(|&idx| Reverse(input.words[idx].len()));

        let mut grid = Grid::new(input.width, input.height);
        let mut placed: Vec<Option<Placement>> = vec![None; input.words.len()];
        let mut partial = false;

        for &idx in &order {
            let word = &input.words[idx];
            let spots = legal_spots(&grid, word);
            if spots.is_empty() {
                warn!(
                    "no legal spot for \"{}\"; dropping it and all remaining words",
                    word.text
                );
                partial = true;
                break;
            }
            let (row, col, dir) = spots[session.rng.index(spots.len())];
            grid.write_word(&word.letters, row, col, dir);
            placed[idx] = Some(Placement {
                word: word.text.clone(),
                row,
                col,
                dir,
            });
        }

        fill_uniform(&mut grid, &input.alphabet, &mut session.rng);

        Ok(Puzzle {
            grid,
            placements: placed.into_iter().flatten().collect(),
            partial,
        })
    }
}

/// Spots where `word` fits, horizontal first, row-major within a direction.
///
/// Single-letter words list each free cell twice, once per direction; both
/// entries stay in the draw.
fn legal_spots(grid: &Grid, word: &Word) -> Vec<(usize, usize, Direction)> {
    let mut spots = Vec::new();
    for dir in [Direction::Horizontal, Direction::Vertical] {
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if grid.fits(&word.letters, row, col, dir).is_some() {
                    spots.push((row, col, dir));
                }
            }
        }
    }
    spots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, GenerateOptions, Strategy};
    use crate::rng::Seed;

    fn free_options(seed: u64) -> GenerateOptions {
        GenerateOptions {
            strategy: Strategy::Free,
            seed: Some(Seed::Number(seed)),
            ..GenerateOptions::default()
        }
    }

    #[test]
    fn test_single_word_exact_fit() {
        let puzzle = generate(&["cat"], &[], 3, 1, free_options(1)).unwrap();
        assert_eq!(puzzle.grid.rows(), vec!["CAT"]);
        assert!(!puzzle.partial);
        assert_eq!(puzzle.placements.len(), 1);
        assert_eq!(puzzle.placements[0].to_string(), "CAT 0,0 H");
    }

    #[test]
    fn test_longest_word_placed_first() {
        // ABC claims the row, then AB rides its first two letters.
        let puzzle = generate(&["ab", "abc"], &[], 3, 1, free_options(1)).unwrap();
        assert_eq!(puzzle.grid.rows(), vec!["ABC"]);
        assert!(!puzzle.partial);
        assert_eq!(puzzle.placements.len(), 2);
        // Request order survives even though ABC was placed first.
        assert_eq!(puzzle.placements[0].word, "AB");
        assert_eq!(puzzle.placements[1].word, "ABC");
    }

    #[test]
    fn test_stuck_word_marks_partial() {
        let puzzle = generate(&["ab", "cd"], &[], 2, 1, free_options(1)).unwrap();
        assert!(puzzle.partial);
        assert_eq!(puzzle.placements.len(), 1);
        assert_eq!(puzzle.placements[0].word, "AB");
        assert_eq!(puzzle.grid.rows(), vec!["AB"]);
    }

    #[test]
    fn test_stuck_word_drops_all_remaining() {
        let puzzle = generate(&["ab", "cd", "ef"], &[], 2, 1, free_options(1)).unwrap();
        assert!(puzzle.partial);
        assert_eq!(puzzle.placements.len(), 1);
    }

    #[test]
    fn test_conflicting_words_never_error() {
        // BA cannot coexist with AB in two cells; free degrades to partial.
        let puzzle = generate(&["ab", "ba"], &[], 2, 1, free_options(1)).unwrap();
        assert!(puzzle.partial);
        assert_eq!(puzzle.placements.len(), 1);
    }

    #[test]
    fn test_seeded_runs_identical() {
        let a = generate(&["cat", "dog", "bird"], &["e"], 8, 8, free_options(5)).unwrap();
        let b = generate(&["cat", "dog", "bird"], &["e"], 8, 8, free_options(5)).unwrap();
        assert_eq!(a.grid.rows(), b.grid.rows());
        assert_eq!(a.placements, b.placements);
    }

    #[test]
    fn test_grid_fully_filled() {
        let puzzle = generate(&["cat"], &[], 5, 5, free_options(9)).unwrap();
        assert!(puzzle.grid.is_complete());
    }

    #[test]
    fn test_legal_spots_single_letter_lists_both_directions() {
        let grid = Grid::new(2, 2);
        let word = Word {
            text: "A".to_string(),
            letters: vec!['A'],
        };
        assert_eq!(legal_spots(&grid, &word).len(), 8);
    }

    #[test]
    fn test_legal_spots_two_letter_word() {
        let grid = Grid::new(2, 2);
        let word = Word {
            text: "AB".to_string(),
            letters: vec!['A', 'B'],
        };
        // Two horizontal starts plus two vertical starts.
        assert_eq!(legal_spots(&grid, &word).len(), 4);
    }
}
