//! Input normalization: raw word and letter lists become a [`PuzzleInput`].

use crate::errors::GenerateError;
use std::collections::HashMap;

/// One requested word with its letters pre-split for grid scans.
#[derive(Debug, Clone)]
pub(crate) struct Word {
    pub(crate) text: String,
    pub(crate) letters: Vec<char>,
}

impl Word {
    pub(crate) fn len(&self) -> usize {
        self.letters.len()
    }
}

/// Validated, normalized generation input.
///
/// `words` preserves request order, duplicates included; `required` maps each
/// distinct word text to the number of copies requested. `alphabet` is sorted
/// and deduplicated so nothing downstream depends on input order.
#[derive(Debug, Clone)]
pub(crate) struct PuzzleInput {
    pub(crate) words: Vec<Word>,
    pub(crate) alphabet: Vec<char>,
    pub(crate) required: HashMap<String, usize>,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl PuzzleInput {
    pub(crate) fn new(
        raw_words: &[&str],
        letters: &[&str],
        width: usize,
        height: usize,
    ) -> Result<Self, GenerateError> {
        // 1. Reject degenerate boards before looking at any word.
        if width == 0 || height == 0 {
            return Err(GenerateError::InvalidDimensions { width, height });
        }

        // 2. Normalize words: trim surrounding whitespace, uppercase, drop
        //    entries that were only whitespace. Duplicates are kept; each
        //    copy must appear in the final grid.
        let words: Vec<Word> = raw_words
            .iter()
            .filter_map(|raw| {
                let text = raw.trim().to_uppercase();
                if text.is_empty() {
                    None
                } else {
                    let letters = text.chars().collect();
                    Some(Word { text, letters })
                }
            })
            .collect();

        // 3. The fill alphabet is every filler letter plus every letter of
        //    every word, sorted and deduplicated.
        let mut alphabet: Vec<char> = letters
            .iter()
            .flat_map(|entry| entry.trim().to_uppercase().chars().collect::<Vec<char>>())
            .chain(words.iter().flat_map(|word| word.letters.iter().copied()))
            .collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        if alphabet.is_empty() {
            return Err(GenerateError::NoLetters);
        }

        // 4. Every word must fit along the longer grid axis.
        let grid_max = width.max(height);
        if let Some(word) = words.iter().max_by_key(|word| word.len()) {
            if word.len() > grid_max {
                return Err(GenerateError::WordTooLong {
                    word: word.text.clone(),
                    len: word.len(),
                    grid_max,
                });
            }
        }

        // 5. Required occurrence count per distinct word text.
        let mut required: HashMap<String, usize> = HashMap::new();
        for word in &words {
            *required.entry(word.text.clone()).or_insert(0) += 1;
        }

        Ok(PuzzleInput {
            words,
            alphabet,
            required,
            width,
            height,
        })
    }

    /// Detects the one shape of puzzle the backtracking search cannot decide
    /// quickly: a single-letter alphabet whose completed grid is forced to be
    /// that letter in every cell. The single-letter word then occurs once per
    /// cell, so any other required count is unsatisfiable.
    ///
    /// Returns the letter and its required count when they conflict.
    pub(crate) fn single_letter_conflict(&self) -> Option<(char, usize)> {
        if self.alphabet.len() != 1 {
            return None;
        }
        let letter = self.alphabet[0];
        let cells = self.width * self.height;
        match self.required.get(&letter.to_string()) {
            Some(&required) if required != cells => Some((letter, required)),
            _ => None,
        }
    }
}

/// Reads a word list from `path`: one word per line, blank lines and `#`
/// comment lines skipped.
pub fn load_words_from_path(path: &str) -> Result<Vec<String>, std::io::Error> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to read word list from '{path}': {e}"),
        )
    })?;
    Ok(parse_words(&content))
}

pub(crate) fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_trimmed_and_uppercased() {
        let input = PuzzleInput::new(&["  cat ", "Dog"], &[], 4, 4).unwrap();
        let texts: Vec<&str> = input.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_blank_words_dropped() {
        let input = PuzzleInput::new(&["cat", "   ", ""], &[], 4, 4).unwrap();
        assert_eq!(input.words.len(), 1);
    }

    #[test]
    fn test_duplicates_kept_and_counted() {
        let input = PuzzleInput::new(&["cat", "CAT", "dog"], &[], 4, 4).unwrap();
        assert_eq!(input.words.len(), 3);
        assert_eq!(input.required["CAT"], 2);
        assert_eq!(input.required["DOG"], 1);
    }

    #[test]
    fn test_word_letters_cached() {
        let input = PuzzleInput::new(&["cat"], &[], 4, 4).unwrap();
        assert_eq!(input.words[0].letters, vec!['C', 'A', 'T']);
        assert_eq!(input.words[0].len(), 3);
    }

    #[test]
    fn test_alphabet_unions_words_and_letters() {
        let input = PuzzleInput::new(&["cab"], &["z", "a"], 4, 4).unwrap();
        assert_eq!(input.alphabet, vec!['A', 'B', 'C', 'Z']);
    }

    #[test]
    fn test_multi_char_letter_entries_split() {
        let input = PuzzleInput::new(&[], &["xyz"], 4, 4).unwrap();
        assert_eq!(input.alphabet, vec!['X', 'Y', 'Z']);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            PuzzleInput::new(&["cat"], &[], 0, 4),
            Err(GenerateError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            PuzzleInput::new(&["cat"], &[], 4, 0),
            Err(GenerateError::InvalidDimensions { width: 4, height: 0 })
        ));
    }

    #[test]
    fn test_no_letters_rejected() {
        assert!(matches!(
            PuzzleInput::new(&[], &[], 4, 4),
            Err(GenerateError::NoLetters)
        ));
        assert!(matches!(
            PuzzleInput::new(&["  "], &[" "], 4, 4),
            Err(GenerateError::NoLetters)
        ));
    }

    #[test]
    fn test_letters_without_words_allowed() {
        let input = PuzzleInput::new(&[], &["a", "b"], 4, 4).unwrap();
        assert!(input.words.is_empty());
        assert_eq!(input.alphabet, vec!['A', 'B']);
    }

    #[test]
    fn test_word_longer_than_both_axes_rejected() {
        let err = PuzzleInput::new(&["elephant"], &[], 4, 4).unwrap_err();
        match err {
            GenerateError::WordTooLong { word, len, grid_max } => {
                assert_eq!(word, "ELEPHANT");
                assert_eq!(len, 8);
                assert_eq!(grid_max, 4);
            }
            other => panic!("expected WordTooLong, got {other:?}"),
        }
    }

    #[test]
    fn test_word_exactly_longest_axis_allowed() {
        // A 3-letter word fits a 3x1 board along its width.
        assert!(PuzzleInput::new(&["cat"], &[], 3, 1).is_ok());
    }

    #[test]
    fn test_longest_word_is_the_one_checked() {
        // The length check compares the longest word against the longer
        // axis, wherever that word sits in the request.
        let err = PuzzleInput::new(&["ox", "elephant", "cat"], &[], 4, 4).unwrap_err();
        match err {
            GenerateError::WordTooLong { word, len, grid_max } => {
                assert_eq!(word, "ELEPHANT");
                assert_eq!(len, 8);
                assert_eq!(grid_max, 4);
            }
            other => panic!("expected WordTooLong, got {other:?}"),
        }

        // With the eight-letter word gone, the longest remaining word fits
        // exactly and the same request validates.
        assert!(PuzzleInput::new(&["ox", "bird", "cat"], &[], 4, 4).is_ok());
    }

    #[test]
    fn test_single_letter_conflict_detected() {
        let input = PuzzleInput::new(&["a"], &[], 2, 2).unwrap();
        assert_eq!(input.single_letter_conflict(), Some(('A', 1)));
    }

    #[test]
    fn test_single_letter_exact_cell_count_is_fine() {
        let input = PuzzleInput::new(&["a", "a"], &[], 2, 1).unwrap();
        assert_eq!(input.single_letter_conflict(), None);
    }

    #[test]
    fn test_single_letter_conflict_needs_unit_alphabet() {
        let input = PuzzleInput::new(&["a"], &["b"], 2, 2).unwrap();
        assert_eq!(input.single_letter_conflict(), None);
    }

    #[test]
    fn test_single_letter_conflict_ignores_longer_words() {
        // "AA" keeps the alphabet at {A} but is not the single-letter word.
        let input = PuzzleInput::new(&["aa"], &[], 2, 1).unwrap();
        assert_eq!(input.single_letter_conflict(), None);
    }

    #[test]
    fn test_parse_words_skips_blanks_and_comments() {
        let content = "cat\n\n# a comment\n  dog  \n#another\nbird\n";
        assert_eq!(parse_words(content), vec!["cat", "dog", "bird"]);
    }
}
