//! Durable backend: append-only JSON-lines file
//!
//! Each assignment is one serialized [`LexiconEntry`] per line. The whole
//! file is replayed at open; every insert appends a line and syncs it to
//! disk before returning, so assignments survive process restarts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use async_trait::async_trait;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::LexiconEntry;
use crate::storage::LexiconBackend;

/// File-backed lexicon storage
#[derive(Debug)]
pub struct JsonlBackend {
    path: PathBuf,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    entries: HashMap<String, String>,
    file: File,
}

impl JsonlBackend {
    /// Open (or create) the lexicon file at `path` and replay its entries.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut entries = HashMap::new();
        if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            for (number, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let entry: LexiconEntry =
                    serde_json::from_str(line).map_err(|e| TranslationError::StoreError {
                        message: format!(
                            "corrupt lexicon line {} in {}: {}",
                            number + 1,
                            path.display(),
                            e
                        ),
                    })?;
                entries.insert(entry.source, entry.target);
            }
            info!(
                "Loaded {} lexicon entries from {}",
                entries.len(),
                path.display()
            );
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            inner: Mutex::new(Inner { entries, file }),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LexiconBackend for JsonlBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.lock().await;
        Ok(inner.entries.get(key).cloned())
    }

    async fn insert_if_absent(&self, entry: LexiconEntry) -> Result<()> {
        let mut inner = self.inner.lock().await;

        // First writer wins; later candidates for the same key are rejected
        if inner.entries.contains_key(&entry.source) {
            debug!("Rejecting duplicate insert for {:?}", entry.source);
            return Err(TranslationError::StoreConflict { key: entry.source });
        }

        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        inner.file.write_all(line.as_bytes()).await?;
        inner.file.sync_all().await?;

        inner.entries.insert(entry.source, entry.target);

        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let inner = self.inner.lock().await;
        Ok(inner.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.jsonl");

        let backend = JsonlBackend::open(&path).await.unwrap();
        assert_eq!(backend.get("sun").await.unwrap(), None);

        backend
            .insert_if_absent(LexiconEntry::new("sun", "veldra"))
            .await
            .unwrap();
        assert_eq!(backend.get("sun").await.unwrap(), Some("veldra".to_string()));
    }

    #[tokio::test]
    async fn test_first_writer_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.jsonl");

        let backend = JsonlBackend::open(&path).await.unwrap();
        backend
            .insert_if_absent(LexiconEntry::new("moon", "ilneth"))
            .await
            .unwrap();
        let second = backend
            .insert_if_absent(LexiconEntry::new("moon", "oskar"))
            .await;

        assert!(matches!(
            second,
            Err(TranslationError::StoreConflict { .. })
        ));
        assert_eq!(
            backend.get("moon").await.unwrap(),
            Some("ilneth".to_string())
        );
        assert_eq!(backend.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.jsonl");

        {
            let backend = JsonlBackend::open(&path).await.unwrap();
            backend
                .insert_if_absent(LexiconEntry::new("river", "thalwen"))
                .await
                .unwrap();
            backend
                .insert_if_absent(LexiconEntry::new("stone", "dask"))
                .await
                .unwrap();
        }

        let reopened = JsonlBackend::open(&path).await.unwrap();
        assert_eq!(reopened.len().await.unwrap(), 2);
        assert_eq!(
            reopened.get("river").await.unwrap(),
            Some("thalwen".to_string())
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.jsonl");
        tokio::fs::write(&path, "not json\n").await.unwrap();

        assert!(matches!(
            JsonlBackend::open(&path).await,
            Err(TranslationError::StoreError { .. })
        ));
    }
}
