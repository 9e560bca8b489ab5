//! Plain-text file processor: one sentence per line

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::errors::{Result, TranslationError};
use crate::core::pipeline::TranslationPipeline;

/// Batch processor translating `.txt` files line by line
#[derive(Clone)]
pub struct TextProcessor {
    pipeline: TranslationPipeline,
}

impl TextProcessor {
    /// Create a new text processor
    pub fn new(pipeline: TranslationPipeline) -> Self {
        Self { pipeline }
    }

    /// Find text files in directory
    pub fn find_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(TranslationError::FileError {
                path: dir.display().to_string(),
                message: "Not a directory".to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && self.is_text_file(&path) {
                files.push(path);
            }
        }

        Ok(files)
    }

    /// Find text files recursively
    pub fn find_files_recursive(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(TranslationError::FileError {
                path: dir.display().to_string(),
                message: "Not a directory".to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && self.is_text_file(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Check if file is plain text
    fn is_text_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase() == "txt")
            .unwrap_or(false)
    }

    /// Translate a single file into `<stem>_translated.txt` under
    /// `output_dir`. Empty lines pass through; every other line is
    /// translated as one sentence.
    pub async fn translate_file(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        debug!("Translating: {}", input.display());

        let content = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| TranslationError::FileError {
                path: input.display().to_string(),
                message: e.to_string(),
            })?;

        let mut translated_lines = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                translated_lines.push(String::new());
            } else {
                translated_lines.push(self.pipeline.translate_sentence(line).await?);
            }
        }

        if !output_dir.exists() {
            tokio::fs::create_dir_all(output_dir)
                .await
                .map_err(|e| TranslationError::FileError {
                    path: output_dir.display().to_string(),
                    message: e.to_string(),
                })?;
        }

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let output = output_dir.join(format!("{}_translated.txt", stem));

        let mut body = translated_lines.join("\n");
        body.push('\n');
        tokio::fs::write(&output, body)
            .await
            .map_err(|e| TranslationError::FileError {
                path: output.display().to_string(),
                message: e.to_string(),
            })?;

        info!("Translated: {} -> {}", input.display(), output.display());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TranslatorConfig;
    use crate::core::lexicon::LexiconStore;
    use crate::core::ngram::NGramModel;
    use crate::core::tokenizer::WhitespaceTokenizer;
    use crate::storage::MemoryBackend;
    use std::sync::Arc;

    fn processor() -> TextProcessor {
        let mut model = NGramModel::new(3).unwrap();
        model.train("the quick brown fox jumps over the lazy dog");

        let store = LexiconStore::new(Arc::new(MemoryBackend::new()), Arc::new(model), 32);
        let pipeline = TranslationPipeline::new(
            Arc::new(WhitespaceTokenizer),
            store,
            &TranslatorConfig::default(),
        );
        TextProcessor::new(pipeline)
    }

    #[tokio::test]
    async fn test_translate_file_line_by_line() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("story.txt");
        tokio::fs::write(&input, "the sun rises.\n\nthe moon sets.\n")
            .await
            .unwrap();

        let output_dir = dir.path().join("out");
        let output = processor()
            .translate_file(&input, &output_dir)
            .await
            .unwrap();

        assert_eq!(output.file_name().unwrap(), "story_translated.txt");
        let body = tokio::fs::read_to_string(&output).await.unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with('.'));
        assert!(lines[1].is_empty());
    }

    #[tokio::test]
    async fn test_find_files_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::write(dir.path().join("b.md"), "x").unwrap();

        let files = processor().find_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "a.txt");
    }
}
