//! Character n-gram model for invented-word synthesis
//!
//! Learns character-transition statistics from natural-language text and
//! generates new strings with the same local statistics. Training is purely
//! additive, so multiple corpora can be accumulated into one model.

use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Everything outside the lowercase Latin alphabet and whitespace is
/// stripped before training
fn alphabetic_filter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z\s]").unwrap())
}

/// Character n-gram model of order `n`.
///
/// # Invariants
/// - `order` is always >= 2
/// - every key in `transitions` and every entry in `seeds` has exactly
///   `order - 1` characters
/// - all recorded transition counts are >= 1
#[derive(Debug, Clone)]
pub struct NGramModel {
    /// Number of characters in one n-gram; context length is `order - 1`
    order: usize,

    /// Context -> next-character occurrence counts
    transitions: HashMap<String, HashMap<char, u32>>,

    /// Word-initial contexts, one entry per trained word. Duplicates are
    /// kept so seed sampling stays proportional to corpus frequency.
    seeds: Vec<String>,
}

impl NGramModel {
    /// Create an empty model of the given order.
    pub fn new(order: usize) -> Result<Self> {
        if order < 2 {
            return Err(TranslationError::InvalidOrder { order });
        }

        Ok(Self {
            order,
            transitions: HashMap::new(),
            seeds: Vec::new(),
        })
    }

    /// Model order
    pub fn order(&self) -> usize {
        self.order
    }

    /// Whether any training data has been absorbed
    pub fn is_trained(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Number of distinct contexts observed so far
    pub fn context_count(&self) -> usize {
        self.transitions.len()
    }

    /// Train on raw text; returns the number of words absorbed.
    ///
    /// Input is lowercased and stripped to `[a-z \s]`, then split on
    /// whitespace. Words shorter than the model order carry no n-gram and
    /// are skipped.
    pub fn train(&mut self, text: &str) -> usize {
        let lowercased = text.to_lowercase();
        let cleaned = alphabetic_filter().replace_all(&lowercased, "");

        let mut trained = 0;
        for word in cleaned.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            if chars.len() < self.order {
                continue;
            }

            self.seeds.push(chars[..self.order - 1].iter().collect());

            for window in chars.windows(self.order) {
                let context: String = window[..self.order - 1].iter().collect();
                let next = window[self.order - 1];
                *self
                    .transitions
                    .entry(context)
                    .or_default()
                    .entry(next)
                    .or_insert(0) += 1;
            }

            trained += 1;
        }

        debug!(
            "Trained on {} words ({} contexts total)",
            trained,
            self.transitions.len()
        );

        trained
    }

    /// Train from a plain-text corpus file; returns the number of words
    /// absorbed. A missing file surfaces as `CorpusNotFound` and leaves the
    /// model untouched.
    pub fn train_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TranslationError::CorpusNotFound {
                    path: path.display().to_string(),
                }
            } else {
                TranslationError::IoError(e)
            }
        })?;

        Ok(self.train(&text))
    }

    /// Merge another model of the same order into this one. Transition
    /// counts are summed and seed multisets concatenated.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if self.order != other.order {
            return Err(TranslationError::ConfigError {
                message: format!(
                    "cannot merge models of different order: {} vs {}",
                    self.order, other.order
                ),
            });
        }

        for (context, counts) in &other.transitions {
            let entry = self.transitions.entry(context.clone()).or_default();
            for (&ch, &count) in counts {
                *entry.entry(ch).or_insert(0) += count;
            }
        }
        self.seeds.extend(other.seeds.iter().cloned());

        Ok(())
    }

    /// Generate a string of exactly `target_length` characters.
    ///
    /// Starts from a frequency-weighted random seed and extends it with
    /// frequency-weighted transitions. A context never observed in training
    /// backs off to a fresh random seed instead of failing, which may
    /// overshoot before the final truncation.
    pub fn generate(&self, target_length: usize) -> Result<String> {
        if self.transitions.is_empty() || self.seeds.is_empty() {
            return Err(TranslationError::UntrainedModel);
        }

        let mut rng = rand::rng();

        let seed = self.seeds.choose(&mut rng).ok_or(TranslationError::UntrainedModel)?;
        let mut buffer: Vec<char> = seed.chars().collect();

        while buffer.len() < target_length {
            let context: String = buffer[buffer.len() - (self.order - 1)..].iter().collect();

            let next = self
                .transitions
                .get(&context)
                .and_then(|counts| weighted_pick(counts, &mut rng));

            match next {
                Some(ch) => buffer.push(ch),
                None => {
                    // Dead end: reseed and keep going
                    if let Some(seed) = self.seeds.choose(&mut rng) {
                        buffer.extend(seed.chars());
                    }
                }
            }
        }

        buffer.truncate(target_length);
        Ok(buffer.into_iter().collect())
    }
}

/// Pick a character at random, weighted by its recorded count. Returns
/// `None` only for an empty or all-zero table.
fn weighted_pick<R: Rng>(counts: &HashMap<char, u32>, rng: &mut R) -> Option<char> {
    let total: u32 = counts.values().sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.random_range(0..total);
    for (&ch, &count) in counts {
        if roll < count {
            return Some(ch);
        }
        roll -= count;
    }

    None
}
