//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::core::models::LengthPolicy;

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub ngram_order: usize,
    pub min_word_length: usize,
    pub length_factor: f64,
    pub max_generate_retries: u32,
    pub vowels: String,
    pub length_policy: LengthPolicy,
    pub corpus_path: String,
    pub lexicon_path: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            ngram_order: 3,
            min_word_length: 3,
            length_factor: 2.5,
            max_generate_retries: 32,
            vowels: "aeiou".to_string(),
            length_policy: LengthPolicy::Reading,
            corpus_path: "corpus.txt".to_string(),
            lexicon_path: "lexicon.jsonl".to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let ngram_order = std::env::var("CONLANG_ORDER")
            .unwrap_or_else(|_| defaults.ngram_order.to_string())
            .parse::<usize>()?;

        let min_word_length = std::env::var("CONLANG_MIN_WORD_LENGTH")
            .unwrap_or_else(|_| defaults.min_word_length.to_string())
            .parse::<usize>()?;

        let length_factor = std::env::var("CONLANG_LENGTH_FACTOR")
            .unwrap_or_else(|_| defaults.length_factor.to_string())
            .parse::<f64>()?;

        let max_generate_retries = std::env::var("CONLANG_MAX_GENERATE_RETRIES")
            .unwrap_or_else(|_| defaults.max_generate_retries.to_string())
            .parse::<u32>()?;

        let vowels = std::env::var("CONLANG_VOWELS").unwrap_or(defaults.vowels);

        let length_policy = std::env::var("CONLANG_LENGTH_POLICY")
            .unwrap_or_else(|_| defaults.length_policy.to_string())
            .parse::<LengthPolicy>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let corpus_path = std::env::var("CONLANG_CORPUS").unwrap_or(defaults.corpus_path);

        let lexicon_path = std::env::var("CONLANG_LEXICON").unwrap_or(defaults.lexicon_path);

        Ok(Self {
            ngram_order,
            min_word_length,
            length_factor,
            max_generate_retries,
            vowels,
            length_policy,
            corpus_path,
            lexicon_path,
        })
    }

    /// Load from JSON or YAML file (by extension)
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                ext == "yaml" || ext == "yml"
            })
            .unwrap_or(false);

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ngram_order < 2 {
            return Err(anyhow::anyhow!("ngram_order must be at least 2"));
        }

        if self.min_word_length == 0 {
            return Err(anyhow::anyhow!("min_word_length must be greater than 0"));
        }

        if self.length_factor <= 0.0 {
            return Err(anyhow::anyhow!("length_factor must be greater than 0"));
        }

        if self.max_generate_retries == 0 {
            return Err(anyhow::anyhow!("max_generate_retries must be greater than 0"));
        }

        if self.vowels.is_empty() {
            return Err(anyhow::anyhow!(
                "vowels must not be empty (no generated word could ever be accepted)"
            ));
        }

        if self.min_word_length < self.ngram_order.saturating_sub(1) {
            warn!(
                "min_word_length {} is below the seed length {}; short words will be seed-truncated",
                self.min_word_length,
                self.ngram_order - 1
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = TranslatorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_order() {
        let config = TranslatorConfig {
            ngram_order: 1,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_vowels() {
        let config = TranslatorConfig {
            vowels: String::new(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_length_policy_roundtrip() {
        let policy: LengthPolicy = "surface".parse().unwrap();
        assert_eq!(policy, LengthPolicy::Surface);
        assert!("syllable".parse::<LengthPolicy>().is_err());
    }
}
