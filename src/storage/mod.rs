//! Persistent lexicon storage backends
//!
//! The lexicon contract is a single collection keyed by source token with
//! point lookup and an atomic insert-if-absent primitive. Conflicts are
//! arbitrated here (first-writer-wins), never surfaced to translation
//! callers.

pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::core::errors::Result;
use crate::core::models::LexiconEntry;

pub use self::file::JsonlBackend;
pub use self::memory::MemoryBackend;

/// Key/value contract the lexicon store builds on
#[async_trait]
pub trait LexiconBackend: Send + Sync {
    /// Point lookup of a stored assignment
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Atomically store `entry` unless its source key is already present.
    /// An already-taken key rejects the insert with `StoreConflict`; the
    /// uniqueness constraint, not an external lock, arbitrates races.
    async fn insert_if_absent(&self, entry: LexiconEntry) -> Result<()>;

    /// Number of stored assignments
    async fn len(&self) -> Result<usize>;
}
