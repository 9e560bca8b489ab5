//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Model order below the supported minimum
    #[error("Invalid n-gram order: {order} (must be >= 2)")]
    InvalidOrder {
        order: usize,
    },

    /// Generation requested before any training occurred
    #[error("Generation requested on an untrained model")]
    UntrainedModel,

    /// Training corpus file missing
    #[error("Corpus file not found: {path}")]
    CorpusNotFound {
        path: String,
    },

    /// Accept-predicate retry loop exceeded its cap
    #[error("Word generation exhausted after {attempts} attempts")]
    GenerationExhausted {
        attempts: u32,
    },

    /// Concurrent insert race on the same lexicon key
    #[error("Store conflict on key: {key}")]
    StoreConflict {
        key: String,
    },

    /// Tokenizer failure
    #[error("Tokenize error: {message}")]
    TokenizeError {
        message: String,
    },

    /// Persistent store failure
    #[error("Store error: {message}")]
    StoreError {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        path: String,
        message: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::InternalError(err.to_string())
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
