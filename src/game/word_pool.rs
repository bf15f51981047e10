use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::domain_error::DomainError;
use crate::error::Error;

pub const MIN_WORDS_PER_PLAYER: usize = 3;
pub const MAX_WORDS_PER_PLAYER: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnWord {
    pub word: String,
    pub index: usize,
}

/// The master list of submitted words plus the words still in play this round.
pub struct WordPool {
    all_words: Vec<String>,
    available_words: Vec<String>,
    rng: StdRng,
}

impl WordPool {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            all_words: Vec::default(),
            available_words: Vec::default(),
            rng,
        }
    }

    pub fn all_words(&self) -> &[String] {
        &self.all_words
    }

    pub fn available_words(&self) -> &[String] {
        &self.available_words
    }

    pub fn remaining(&self) -> usize {
        self.available_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available_words.is_empty()
    }

    /// Adds one player's submission to the master list. Words are trimmed and blanks ignored.
    pub fn add_words(&mut self, nickname: &str, words: Vec<String>) -> Result<(), Error> {
        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();

        WordPool::validate_words(nickname, &words)?;

        log::debug!(
            "Words added. Nickname: '{nickname}', Words: '{}', TotalWords: '{}'.",
            words.len(),
            self.all_words.len() + words.len()
        );
        self.all_words.extend(words);
        Ok(())
    }

    fn validate_words(nickname: &str, words: &[String]) -> Result<(), Error> {
        if words.len() < MIN_WORDS_PER_PLAYER {
            return Err(DomainError::NotEnoughWords {
                nickname: nickname.to_string(),
                actual: words.len(),
                minimum: MIN_WORDS_PER_PLAYER,
            }
            .into());
        }
        if words.len() > MAX_WORDS_PER_PLAYER {
            return Err(DomainError::TooManyWords {
                nickname: nickname.to_string(),
                actual: words.len(),
                maximum: MAX_WORDS_PER_PLAYER,
            }
            .into());
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut repeated_words: Vec<String> = Vec::new();
        for word in words {
            let lowercase = word.to_lowercase();
            if !seen.insert(lowercase.clone()) && !repeated_words.contains(&lowercase) {
                repeated_words.push(lowercase);
            }
        }
        if !repeated_words.is_empty() {
            return Err(DomainError::RepeatedWords {
                nickname: nickname.to_string(),
                repeated_words,
            }
            .into());
        }

        Ok(())
    }

    /// Refills the round's pool with a freshly shuffled copy of the master list.
    pub fn start_round(&mut self) {
        let mut words = self.all_words.clone();
        words.shuffle(&mut self.rng);
        self.available_words = words;
    }

    /// Picks a word without removing it, `None` when the pool is exhausted.
    pub fn draw_random_word(&mut self) -> Option<DrawnWord> {
        if self.available_words.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.available_words.len());
        Some(DrawnWord {
            word: self.available_words[index].clone(),
            index,
        })
    }

    pub fn consume_word(&mut self, index: usize) -> Result<String, Error> {
        if index >= self.available_words.len() {
            return Err(Error::log_and_create_internal(&format!(
                "Tried to consume a word outside of the pool. Index: '{index}', AvailableWords: '{}'.",
                self.available_words.len()
            )));
        }
        Ok(self.available_words.remove(index))
    }

    pub fn clear(&mut self) {
        self.all_words.clear();
        self.available_words.clear();
    }
}

impl Default for WordPool {
    fn default() -> Self {
        Self::new()
    }
}
