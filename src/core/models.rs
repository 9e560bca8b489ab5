//! Core data models for translation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which character count drives generated word length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Size by the token's phonetic reading (default; surface length
    /// misrepresents pronunciation for multi-character-per-syllable scripts)
    Reading,
    /// Size by the token's surface string
    Surface,
}

impl LengthPolicy {
    /// Character count of the token under this policy
    pub fn measure(&self, token: &Token) -> usize {
        match self {
            LengthPolicy::Reading => token.reading.chars().count(),
            LengthPolicy::Surface => token.surface.chars().count(),
        }
    }
}

impl fmt::Display for LengthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthPolicy::Reading => write!(f, "reading"),
            LengthPolicy::Surface => write!(f, "surface"),
        }
    }
}

impl std::str::FromStr for LengthPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reading" => Ok(LengthPolicy::Reading),
            "surface" => Ok(LengthPolicy::Surface),
            other => Err(format!("unknown length policy: {}", other)),
        }
    }
}

/// A source-language token produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    pub reading: String,
}

impl Token {
    pub fn new(surface: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.into(),
        }
    }

    /// Token whose reading equals its surface (scripts without a separate
    /// phonetic form)
    pub fn plain(surface: impl Into<String>) -> Self {
        let surface = surface.into();
        let reading = surface.clone();
        Self { surface, reading }
    }

    /// Whitespace-only tokens are skipped by the pipeline
    pub fn is_whitespace(&self) -> bool {
        self.surface.chars().all(char::is_whitespace)
    }
}

/// A punctuation-delimited span of a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Span of source text between delimiters (may be empty)
    Text(String),
    /// A single delimiter occurrence
    Punct(char),
}

/// One persistent source-token → invented-word assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub source: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
}

impl LexiconEntry {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            created_at: Utc::now(),
        }
    }
}
