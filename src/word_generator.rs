use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::language::Language;

/// Number of words in a freshly generated prompt
pub const DEFAULT_WORD_COUNT: usize = 50;

/// Produces prompts by drawing words from a [`Language`].
///
/// Words are picked independently and uniformly, with replacement. Passing a
/// seed makes the sequence of prompts reproducible; without one the generator
/// is seeded from OS entropy.
#[derive(Debug, Clone)]
pub struct WordGenerator {
    language: Language,
    rng: StdRng,
}

impl WordGenerator {
    pub fn new(language: Language, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { language, rng }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Generate `count` words joined by single spaces
    pub fn generate(&mut self, count: usize) -> String {
        let words = &self.language.words;
        (0..count)
            .filter_map(|_| words.choose(&mut self.rng))
            .join(" ")
    }
}
