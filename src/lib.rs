//! Conlang Translator - constructed-language translation library
//!
//! This library maps source-language tokens to invented tokens of a
//! constructed language: a trainable character n-gram model synthesizes
//! pronounceable words, a persistent lexicon memoizes every assignment,
//! and a chunk-based pipeline reassembles translated sentences with
//! per-clause word-order inversion.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod core;
pub mod processors;
pub mod storage;

// Re-export key types for convenience
pub use crate::core::{
    config::TranslatorConfig,
    errors::TranslationError,
    lexicon::LexiconStore,
    models::{Chunk, LengthPolicy, LexiconEntry, Token},
    ngram::NGramModel,
    pipeline::TranslationPipeline,
    tokenizer::{Tokenizer, WhitespaceTokenizer},
};

pub use crate::processors::text::TextProcessor;

pub use crate::storage::{JsonlBackend, LexiconBackend, MemoryBackend};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
