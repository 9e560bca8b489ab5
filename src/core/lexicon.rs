//! Memoizing assignment store: source token -> invented word, exactly once
//!
//! The first translation request for an unseen token generates a word and
//! persists it; every later request returns the stored word unchanged. The
//! mapping is a permanent memo, not a cache with eviction.

use std::sync::Arc;
use tracing::debug;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::LexiconEntry;
use crate::core::ngram::NGramModel;
use crate::storage::LexiconBackend;

/// Lexicon store combining the generator with a durable backend
#[derive(Clone)]
pub struct LexiconStore {
    backend: Arc<dyn LexiconBackend>,
    model: Arc<NGramModel>,
    max_generate_retries: u32,
}

impl LexiconStore {
    /// Create a store over the given backend and trained model
    pub fn new(
        backend: Arc<dyn LexiconBackend>,
        model: Arc<NGramModel>,
        max_generate_retries: u32,
    ) -> Self {
        Self {
            backend,
            model,
            max_generate_retries,
        }
    }

    /// Look up the assignment for `source_key`, generating and persisting
    /// one on first sight.
    ///
    /// Generation retries until `accept` passes, capped at
    /// `max_generate_retries`; exhaustion surfaces `GenerationExhausted`
    /// and persists nothing. A concurrent first-creation race on the same
    /// key resolves to the first-written value via the backend's
    /// insert-if-absent contract.
    pub async fn get_or_create<F>(
        &self,
        source_key: &str,
        desired_length: usize,
        accept: F,
    ) -> Result<String>
    where
        F: Fn(&str) -> bool,
    {
        // Common case: the token has been seen before
        if let Some(existing) = self.backend.get(source_key).await? {
            return Ok(existing);
        }

        let mut candidate = None;
        for attempt in 1..=self.max_generate_retries {
            let word = self.model.generate(desired_length)?;
            if accept(&word) {
                candidate = Some(word);
                break;
            }
            debug!(
                "Rejected candidate {:?} for {:?} (attempt {})",
                word, source_key, attempt
            );
        }

        let word = candidate.ok_or(TranslationError::GenerationExhausted {
            attempts: self.max_generate_retries,
        })?;

        match self
            .backend
            .insert_if_absent(LexiconEntry::new(source_key, word.clone()))
            .await
        {
            Ok(()) => Ok(word),
            Err(TranslationError::StoreConflict { .. }) => {
                // Lost the first-creation race; the stored value wins and
                // the fresh candidate is discarded
                debug!("Insert race on {:?} resolved to stored value", source_key);
                self.backend.get(source_key).await?.ok_or_else(|| {
                    TranslationError::StoreError {
                        message: format!("entry for {:?} vanished after conflict", source_key),
                    }
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Number of assignments currently stored
    pub async fn len(&self) -> Result<usize> {
        self.backend.len().await
    }
}
