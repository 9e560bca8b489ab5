//! In-memory lexicon backend for tests and ephemeral runs

use std::collections::HashMap;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::LexiconEntry;
use crate::storage::LexiconBackend;

/// Non-durable backend; assignments live only as long as the process
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LexiconBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn insert_if_absent(&self, entry: LexiconEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.source) {
            return Err(TranslationError::StoreConflict { key: entry.source });
        }
        entries.insert(entry.source, entry.target);
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let entries = self.entries.read().await;
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_if_absent_keeps_first_value() {
        let backend = MemoryBackend::new();

        backend
            .insert_if_absent(LexiconEntry::new("tree", "morvi"))
            .await
            .unwrap();
        let second = backend
            .insert_if_absent(LexiconEntry::new("tree", "keldo"))
            .await;

        assert!(matches!(
            second,
            Err(TranslationError::StoreConflict { .. })
        ));
        assert_eq!(backend.get("tree").await.unwrap(), Some("morvi".to_string()));
        assert_eq!(backend.len().await.unwrap(), 1);
    }
}
