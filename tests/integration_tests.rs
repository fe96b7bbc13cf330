//! Integration tests for the word-search puzzle generator.
//!
//! These tests exercise the complete pipeline from input validation through
//! placement search to the final filled grid, for both placement strategies.

use wordgrid::errors::GenerateError;
use wordgrid::generator::{self, GenerateOptions, Puzzle, Strategy, TieBreaker};
use wordgrid::placement::{Direction, Placement};
use wordgrid::rng::Seed;

/// Seeded options for the intersecting strategy, library defaults elsewhere.
fn intersecting_with_seed(seed: u64) -> GenerateOptions {
    GenerateOptions {
        strategy: Strategy::Intersecting,
        seed: Some(Seed::Number(seed)),
        ..GenerateOptions::default()
    }
}

/// Seeded options for the free strategy.
fn free_with_seed(seed: u64) -> GenerateOptions {
    GenerateOptions {
        strategy: Strategy::Free,
        seed: Some(Seed::Number(seed)),
        ..GenerateOptions::default()
    }
}

/// Counts occurrences of `word` by scanning the rendered rows directly,
/// independently of the grid's own counting. Horizontal windows are checked
/// in every row; vertical windows only for words of two or more letters, so
/// a single letter is not counted once per axis.
fn scan_occurrences(rows: &[String], word: &str) -> usize {
    let letters: Vec<char> = word.chars().collect();
    let table: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
    let height = table.len();
    let width = table.first().map_or(0, Vec::len);

    let mut count = 0;
    if letters.len() <= width {
        for row in &table {
            for start in 0..=(width - letters.len()) {
                if (0..letters.len()).all(|i| row[start + i] == letters[i]) {
                    count += 1;
                }
            }
        }
    }
    if letters.len() > 1 && letters.len() <= height {
        for col in 0..width {
            for start in 0..=(height - letters.len()) {
                if (0..letters.len()).all(|i| table[start + i][col] == letters[i]) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Asserts the grid is fully lettered and every letter comes from `allowed`.
fn assert_filled_from(puzzle: &Puzzle, allowed: &str) {
    assert!(puzzle.grid.is_complete(), "grid should have no empty cells");
    for row in puzzle.grid.rows() {
        for letter in row.chars() {
            assert!(
                allowed.contains(letter),
                "cell letter '{letter}' not drawn from \"{allowed}\""
            );
        }
    }
}

#[cfg(test)]
mod worked_examples {
    use super::*;

    #[test]
    fn test_exact_fit_single_word() {
        // A 3x1 board leaves exactly one arrangement for a 3-letter word.
        for options in [intersecting_with_seed(1), free_with_seed(1)] {
            let puzzle = generator::generate(&["CAT"], &[], 3, 1, options).unwrap();

            assert_eq!(puzzle.grid.rows(), vec!["CAT"]);
            assert!(!puzzle.partial);
            assert_eq!(puzzle.placements.len(), 1);
            assert_eq!(puzzle.placements[0].to_string(), "CAT 0,0 H");
        }
    }

    #[test]
    fn test_two_words_in_small_board() {
        let puzzle =
            generator::generate(&["CAT", "DOG"], &[], 3, 3, intersecting_with_seed(1)).unwrap();

        assert!(!puzzle.partial);
        assert_filled_from(&puzzle, "CATDOG");
        // Each word appears exactly once, counting both reading directions.
        assert_eq!(puzzle.grid.count_occurrences("CAT"), 1);
        assert_eq!(puzzle.grid.count_occurrences("DOG"), 1);

        // The same seed reproduces the same board.
        let again =
            generator::generate(&["CAT", "DOG"], &[], 3, 3, intersecting_with_seed(1)).unwrap();
        assert_eq!(again.grid.rows(), puzzle.grid.rows());
        assert_eq!(again.placements, puzzle.placements);
    }

    #[test]
    fn test_letters_only_board() {
        // No words at all: the board is just filler letters.
        let puzzle =
            generator::generate(&[], &["X"], 2, 2, intersecting_with_seed(4)).unwrap();

        assert_eq!(puzzle.grid.rows(), vec!["XX", "XX"]);
        assert!(puzzle.placements.is_empty());
        assert!(!puzzle.partial);
    }

    #[test]
    fn test_words_loaded_from_file() {
        let words = wordgrid::wordlist::load_words_from_path("tests/fixtures/word_list.txt")
            .expect("fixture word list should load");

        // Comment lines and blanks are dropped; case is preserved for the
        // generator to normalize.
        assert_eq!(words, vec!["CAT", "DOG", "WREN", "owl"]);

        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let puzzle = generator::generate(&refs, &[], 8, 8, intersecting_with_seed(2)).unwrap();

        assert!(!puzzle.partial);
        assert_eq!(puzzle.grid.count_occurrences("OWL"), 1);
    }
}

#[cfg(test)]
mod intersecting_invariants {
    use super::*;

    #[test]
    fn test_each_word_appears_exactly_once() {
        let words = ["CAT", "DOG", "BIRD"];
        let puzzle = generator::generate(&words, &[], 8, 8, intersecting_with_seed(7)).unwrap();

        assert!(!puzzle.partial);
        let rows = puzzle.grid.rows();
        for word in words {
            assert_eq!(puzzle.grid.count_occurrences(word), 1, "count for {word}");
            // Cross-check against an independent scan of the rendered rows.
            assert_eq!(scan_occurrences(&rows, word), 1, "scan for {word}");
        }
    }

    #[test]
    fn test_duplicate_words_appear_twice() {
        let puzzle =
            generator::generate(&["CAT", "CAT"], &[], 6, 6, intersecting_with_seed(3)).unwrap();

        assert!(!puzzle.partial);
        assert_eq!(puzzle.placements.len(), 2);
        assert_eq!(puzzle.grid.count_occurrences("CAT"), 2);
    }

    #[test]
    fn test_placements_spell_their_words() {
        let puzzle = generator::generate(
            &["HORSE", "MOUSE", "HEN"],
            &[],
            9,
            9,
            intersecting_with_seed(5),
        )
        .unwrap();

        assert!(!puzzle.partial);
        for placement in &puzzle.placements {
            let cells = placement.cells();
            assert_eq!(cells.len(), placement.word.chars().count());
            for (letter, (row, col)) in placement.word.chars().zip(cells) {
                assert_eq!(
                    puzzle.grid.get(row, col),
                    Some(letter),
                    "cell ({row}, {col}) should hold '{letter}' for {}",
                    placement.word
                );
            }
        }
    }

    #[test]
    fn test_placements_follow_request_order() {
        let words = ["WREN", "OWL", "CROW"];
        let puzzle = generator::generate(&words, &[], 8, 8, intersecting_with_seed(9)).unwrap();

        let placed: Vec<&str> = puzzle.placements.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(placed, words);
    }

    #[test]
    fn test_filler_avoids_extra_copies_of_single_letter() {
        // One 'A' requested, filler letter 'B' available: the fill may not
        // introduce a second 'A' anywhere.
        let puzzle =
            generator::generate(&["A"], &["B"], 2, 2, intersecting_with_seed(5)).unwrap();

        assert!(!puzzle.partial);
        let letter_count = puzzle
            .grid
            .rows()
            .iter()
            .flat_map(|row| row.chars())
            .filter(|&c| c == 'A')
            .count();
        assert_eq!(letter_count, 1);
        assert_eq!(puzzle.grid.count_occurrences("A"), 1);
    }

    #[test]
    fn test_crossing_words_share_a_cell() {
        // CAT and COW can only overlap at their shared 'C', and the search
        // prefers arrangements with more overlap, so the two placements cross.
        let puzzle =
            generator::generate(&["CAT", "COW"], &[], 5, 5, intersecting_with_seed(2)).unwrap();

        assert!(!puzzle.partial);
        let first = puzzle.placements[0].cells();
        let shared = puzzle.placements[1]
            .cells()
            .iter()
            .filter(|cell| first.contains(cell))
            .count();
        assert_eq!(shared, 1);
    }

    #[test]
    fn test_anagram_words_stay_distinct() {
        let puzzle =
            generator::generate(&["NOTE", "TONE"], &[], 7, 7, intersecting_with_seed(11)).unwrap();

        assert!(!puzzle.partial);
        let rows = puzzle.grid.rows();
        assert_eq!(scan_occurrences(&rows, "NOTE"), 1);
        assert_eq!(scan_occurrences(&rows, "TONE"), 1);
    }

    #[test]
    fn test_center_tie_breaker_prefers_middle() {
        let options = GenerateOptions {
            strategy: Strategy::Intersecting,
            seed: Some(Seed::Number(1)),
            tie_breaker: TieBreaker::Center,
            ..GenerateOptions::default()
        };
        let puzzle = generator::generate(&["CAT"], &[], 5, 5, options).unwrap();

        // The word's middle letter lands on the central cell.
        assert_eq!(
            puzzle.placements[0],
            Placement {
                word: "CAT".to_string(),
                row: 2,
                col: 1,
                dir: Direction::Horizontal,
            }
        );
    }
}

#[cfg(test)]
mod determinism {
    use super::*;

    #[test]
    fn test_same_numeric_seed_same_board() {
        let words = ["CAT", "DOG", "OWL"];
        let first = generator::generate(&words, &[], 6, 6, intersecting_with_seed(42)).unwrap();
        let second = generator::generate(&words, &[], 6, 6, intersecting_with_seed(42)).unwrap();

        assert_eq!(first.grid.rows(), second.grid.rows());
        assert_eq!(first.placements, second.placements);
    }

    #[test]
    fn test_text_seed_is_reproducible() {
        let options = || GenerateOptions {
            strategy: Strategy::Intersecting,
            seed: Some(Seed::parse("tuesday puzzle")),
            ..GenerateOptions::default()
        };
        let words = ["HORSE", "SHEEP"];
        let first = generator::generate(&words, &[], 7, 7, options()).unwrap();
        let second = generator::generate(&words, &[], 7, 7, options()).unwrap();

        assert_eq!(first.grid.rows(), second.grid.rows());
    }

    #[test]
    fn test_free_strategy_is_reproducible() {
        let words = ["CAT", "DOG", "OWL", "HEN"];
        let first = generator::generate(&words, &[], 6, 6, free_with_seed(9)).unwrap();
        let second = generator::generate(&words, &[], 6, 6, free_with_seed(9)).unwrap();

        assert_eq!(first.grid.rows(), second.grid.rows());
        assert_eq!(first.placements, second.placements);
    }
}

#[cfg(test)]
mod partial_results {
    use super::*;

    #[test]
    fn test_free_drops_stuck_word_and_continues() {
        // "AB" fills the only row; "CD" has nowhere to go and is dropped.
        let puzzle = generator::generate(&["AB", "CD"], &[], 2, 1, free_with_seed(1)).unwrap();

        assert!(puzzle.partial);
        assert_eq!(puzzle.grid.rows(), vec!["AB"]);
        assert_eq!(puzzle.placements.len(), 1);
        assert_eq!(puzzle.placements[0].word, "AB");
    }

    #[test]
    fn test_free_never_fails_on_conflicts() {
        // The intersecting strategy rejects this input; free settles for less.
        let puzzle = generator::generate(&["AB", "BA"], &[], 2, 1, free_with_seed(1)).unwrap();

        assert!(puzzle.partial);
        assert_eq!(puzzle.grid.rows(), vec!["AB"]);
    }

    #[test]
    fn test_budget_cancellation_keeps_best_partial() {
        let options = GenerateOptions {
            strategy: Strategy::Intersecting,
            seed: Some(Seed::Number(1)),
            max_iterations: 2,
            ..GenerateOptions::default()
        };
        // Two iterations allow two words to be committed before the search
        // is cancelled; the third is never reached.
        let puzzle = generator::generate(&["CAT", "DOG", "BIRD"], &[], 8, 8, options).unwrap();

        assert!(puzzle.partial);
        assert_eq!(puzzle.placements.len(), 2);
        assert!(puzzle.grid.is_complete(), "partial boards are still filled");
    }

    #[test]
    fn test_zero_budget_exhausts_without_placing() {
        let options = GenerateOptions {
            strategy: Strategy::Intersecting,
            seed: Some(Seed::Number(1)),
            max_iterations: 0,
            ..GenerateOptions::default()
        };
        let err = generator::generate(&["CAT"], &[], 5, 5, options).unwrap_err();

        assert_eq!(err, GenerateError::BudgetExhausted { max_iterations: 0 });
    }

    #[test]
    fn test_impossible_arrangement_is_infeasible() {
        // Both words demand the full row with conflicting letters.
        let err = generator::generate(&["AB", "BA"], &[], 2, 1, intersecting_with_seed(1))
            .unwrap_err();

        assert!(
            matches!(err, GenerateError::Infeasible { width: 2, height: 1, .. }),
            "expected Infeasible, got: {err:?}"
        );
    }
}

#[cfg(test)]
mod error_cases {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        let err = generator::generate(&["CAT"], &[], 0, 5, intersecting_with_seed(1)).unwrap_err();

        assert_eq!(err, GenerateError::InvalidDimensions { width: 0, height: 5 });
        assert_eq!(err.code(), "G001");
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = generator::generate(&[], &[], 3, 3, intersecting_with_seed(1)).unwrap_err();

        assert_eq!(err, GenerateError::NoLetters);
    }

    #[test]
    fn test_word_longer_than_both_axes_rejected() {
        let err =
            generator::generate(&["ELEPHANT"], &[], 4, 4, intersecting_with_seed(1)).unwrap_err();

        assert_eq!(
            err,
            GenerateError::WordTooLong {
                word: "ELEPHANT".to_string(),
                len: 8,
                grid_max: 4,
            }
        );
    }

    #[test]
    fn test_single_letter_saturation_depends_on_strategy() {
        // The intersecting strategy cannot keep 'A' to one copy when 'A' is
        // the only letter available for the other three cells.
        let err = generator::generate(&["A"], &[], 2, 2, intersecting_with_seed(1)).unwrap_err();
        assert_eq!(
            err,
            GenerateError::SingleLetterSaturation { letter: 'A', required: 1, cells: 4 }
        );

        // The free strategy has no occurrence bookkeeping and happily fills
        // the whole board with 'A'.
        let puzzle = generator::generate(&["A"], &[], 2, 2, free_with_seed(1)).unwrap();
        assert_eq!(puzzle.grid.rows(), vec!["AA", "AA"]);
        assert!(!puzzle.partial);
    }

    #[test]
    fn test_blank_words_are_dropped_and_case_normalized() {
        let puzzle = generator::generate(
            &["  cat  ", "", "dog"],
            &[],
            4,
            4,
            intersecting_with_seed(6),
        )
        .unwrap();

        let placed: Vec<&str> = puzzle.placements.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(placed, vec!["CAT", "DOG"]);
    }
}

#[cfg(test)]
mod progress {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_progress_reports_are_monotonic_fractions() {
        let seen: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let options = GenerateOptions {
            strategy: Strategy::Intersecting,
            seed: Some(Seed::Number(1)),
            max_iterations: 10_000,
            on_progress: Some(Box::new(move |fraction| sink.borrow_mut().push(fraction))),
            ..GenerateOptions::default()
        };

        // Four short words in a small board: the search tree is much larger
        // than the budget, so the callback fires many times along the way.
        let puzzle = generator::generate(&["AB", "CD", "EF", "GH"], &[], 4, 4, options).unwrap();
        assert!(puzzle.grid.is_complete());

        let reports = seen.borrow();
        assert!(
            reports.len() >= 5,
            "expected several progress reports, got {}",
            reports.len()
        );
        for pair in reports.windows(2) {
            assert!(pair[0] <= pair[1], "progress went backwards: {pair:?}");
        }
        assert!(reports.iter().all(|f| (0.0..=1.0).contains(f)));
    }
}

#[cfg(test)]
mod free_strategy {
    use super::*;

    #[test]
    fn test_shorter_word_may_ride_on_longer_one() {
        // CAT is placed first (longest), then AT fits inside it with full
        // overlap. Both placements are reported, in request order.
        let puzzle = generator::generate(&["AT", "CAT"], &[], 3, 1, free_with_seed(1)).unwrap();

        assert!(!puzzle.partial);
        assert_eq!(puzzle.grid.rows(), vec!["CAT"]);
        let placed: Vec<&str> = puzzle.placements.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(placed, vec!["AT", "CAT"]);
    }

    #[test]
    fn test_filler_letters_complete_the_board() {
        let puzzle = generator::generate(&["DOG"], &["X", "Y"], 4, 4, free_with_seed(6)).unwrap();

        assert!(!puzzle.partial);
        assert_filled_from(&puzzle, "DOGXY");
        // Random filler can spell extra copies; at least the placed one exists.
        assert!(puzzle.grid.count_occurrences("DOG") >= 1);
    }

    #[test]
    fn test_rows_match_display() {
        let puzzle = generator::generate(&["CAT"], &[], 3, 2, free_with_seed(8)).unwrap();

        assert_eq!(puzzle.grid.rows().join("\n"), puzzle.grid.to_string());
        assert_eq!(puzzle.grid.width(), 3);
        assert_eq!(puzzle.grid.height(), 2);
    }
}
