//! Deterministic random numbers for puzzle generation.
//!
//! The generator promises bit-identical output for the same inputs and seed
//! on every platform, so randomness comes from a small 32-bit mixer
//! (mulberry32) over a state derived from the caller's seed rather than from
//! `std`'s hash-based sources. Unseeded runs pull their initial state from
//! the operating system, falling back to a process-global counter when that
//! fails.

use std::sync::atomic::{AtomicU32, Ordering};

/// A reproducibility seed, numeric or textual.
///
/// Both forms reduce to a 32-bit state: numbers by folding the high word into
/// the low word, text by FNV-1a hashing of its UTF-8 bytes. Equal seeds give
/// byte-identical puzzles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// Parses seed text the way the CLI does: all-digit strings that fit a
    /// `u64` are numeric seeds, anything else is a text seed.
    #[must_use]
    pub fn parse(raw: &str) -> Seed {
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<u64>() {
                return Seed::Number(n);
            }
        }
        Seed::Text(raw.to_string())
    }

    fn state(&self) -> u32 {
        match self {
            // Fold the high word in so seeds differing only above bit 31
            // still produce different states.
            Seed::Number(n) => (*n ^ (*n >> 32)) as u32,
            Seed::Text(text) => fnv1a(text),
        }
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed::Number(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_string())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Seed::Text(value)
    }
}

/// FNV-1a over UTF-8 bytes, 32-bit variant.
fn fnv1a(text: &str) -> u32 {
    let mut hash: u32 = 0x811C_9DC5;
    for &byte in text.as_bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

fn entropy_state() -> u32 {
    let mut bytes = [0u8; 4];
    if getrandom::getrandom(&mut bytes).is_ok() {
        u32::from_le_bytes(bytes)
    } else {
        // Last resort: distinct states per call, not cryptographic.
        static COUNTER: AtomicU32 = AtomicU32::new(0x9E37_79B9);
        COUNTER.fetch_add(0x6D2B_79F5, Ordering::Relaxed)
    }
}

/// The crate's only randomness source (mulberry32).
#[derive(Debug, Clone)]
pub(crate) struct GridRng {
    state: u32,
}

impl GridRng {
    pub(crate) fn new(seed: Option<&Seed>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => GridRng {
                state: entropy_state(),
            },
        }
    }

    pub(crate) fn seeded(seed: &Seed) -> Self {
        GridRng {
            state: seed.state(),
        }
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }

    /// Uniform draw from `[0, 1)`.
    pub(crate) fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform index into a collection of `bound` elements.
    pub(crate) fn index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "index requires a non-empty range");
        let raw = (self.next_f64() * bound as f64) as usize;
        raw.min(bound - 1)
    }

    /// Fisher-Yates shuffle, drawing indexes back to front.
    pub(crate) fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
