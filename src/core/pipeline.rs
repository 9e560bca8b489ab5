//! Sentence translation pipeline
//!
//! Splits a sentence into punctuation-delimited chunks, translates each
//! text chunk token-by-token through the lexicon store, reverses token
//! order within the chunk, and reassembles the chunks in original order.
//! Clause order across the sentence is preserved; token order within each
//! clause is the invented language's defining inversion.

use std::sync::Arc;
use tracing::debug;

use crate::core::config::TranslatorConfig;
use crate::core::errors::Result;
use crate::core::lexicon::LexiconStore;
use crate::core::models::{Chunk, LengthPolicy, Token};
use crate::core::tokenizer::Tokenizer;

/// Clause delimiters, source-script and ASCII forms
fn is_delimiter(c: char) -> bool {
    matches!(c, '、' | '。' | '！' | '？' | ',' | '.' | '!' | '?')
}

/// Fixed substitution table for delimiter output
fn canonical_rendering(delimiter: char) -> &'static str {
    match delimiter {
        '、' | ',' => ", ",
        '。' | '.' => ". ",
        '！' | '!' => "! ",
        '？' | '?' => "? ",
        _ => "",
    }
}

/// Translation pipeline over a tokenizer, a lexicon store, and a sizing
/// policy
#[derive(Clone)]
pub struct TranslationPipeline {
    tokenizer: Arc<dyn Tokenizer>,
    store: LexiconStore,
    min_word_length: usize,
    length_factor: f64,
    length_policy: LengthPolicy,
    vowels: String,
}

impl TranslationPipeline {
    /// Create a pipeline with sizing and acceptance knobs from `config`
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        store: LexiconStore,
        config: &TranslatorConfig,
    ) -> Self {
        Self {
            tokenizer,
            store,
            min_word_length: config.min_word_length,
            length_factor: config.length_factor,
            length_policy: config.length_policy,
            vowels: config.vowels.clone(),
        }
    }

    /// Split a sentence into alternating text and punctuation chunks.
    /// Every delimiter occurrence becomes its own chunk; empty text spans
    /// are retained so the original clause structure stays reconstructible.
    pub fn split_chunks(sentence: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for c in sentence.chars() {
            if is_delimiter(c) {
                chunks.push(Chunk::Text(std::mem::take(&mut current)));
                chunks.push(Chunk::Punct(c));
            } else {
                current.push(c);
            }
        }
        chunks.push(Chunk::Text(current));

        chunks
    }

    /// Translate a full sentence into reordered invented-language text
    pub async fn translate_sentence(&self, sentence: &str) -> Result<String> {
        let mut output = String::new();

        for chunk in Self::split_chunks(sentence) {
            match chunk {
                Chunk::Punct(delimiter) => output.push_str(canonical_rendering(delimiter)),
                Chunk::Text(span) => output.push_str(&self.translate_span(&span).await?),
            }
        }

        let translated = output.trim_end().to_string();
        debug!("Translated {:?} -> {:?}", sentence, translated);
        Ok(translated)
    }

    /// Translate one text chunk: memoized word per token, then reverse the
    /// chunk's token order. A chunk with no translatable tokens yields an
    /// empty string, never a stray space.
    async fn translate_span(&self, span: &str) -> Result<String> {
        if span.is_empty() {
            return Ok(String::new());
        }

        let tokens = self.tokenizer.tokenize(span)?;

        let mut translated = Vec::new();
        for token in tokens.iter().filter(|t| !t.is_whitespace()) {
            let desired_length = self.desired_length(token);
            let vowels = self.vowels.as_str();
            let word = self
                .store
                .get_or_create(&token.surface, desired_length, |w| {
                    w.chars().any(|c| vowels.contains(c))
                })
                .await?;
            translated.push(word);
        }

        translated.reverse();
        Ok(translated.join(" "))
    }

    /// Caller-side sizing policy: scale the policy-selected character
    /// count, floored at the configured minimum
    fn desired_length(&self, token: &Token) -> usize {
        let measured = self.length_policy.measure(token);
        let scaled = (measured as f64 * self.length_factor).ceil() as usize;
        scaled.max(self.min_word_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::TranslationError;
    use crate::core::lexicon::LexiconStore;
    use crate::core::models::LexiconEntry;
    use crate::core::ngram::NGramModel;
    use crate::storage::{LexiconBackend, MemoryBackend};

    /// Fixed segmentations, independent of any real analyzer
    struct StubTokenizer;

    impl Tokenizer for StubTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
            let tokens = match text {
                "A" => vec![Token::plain("t1"), Token::plain("t2")],
                "B" => vec![Token::plain("t3")],
                "C" => vec![Token::plain("t4")],
                other => other.split_whitespace().map(Token::plain).collect(),
            };
            Ok(tokens)
        }
    }

    fn trained_model() -> Arc<NGramModel> {
        let mut model = NGramModel::new(3).unwrap();
        model.train("the quick brown fox jumps over the lazy dog");
        Arc::new(model)
    }

    async fn seeded_pipeline(tokenizer: Arc<dyn Tokenizer>) -> TranslationPipeline {
        let backend = Arc::new(MemoryBackend::new());
        for (source, target) in [("t1", "w1"), ("t2", "w2"), ("t3", "w3"), ("t4", "w4")] {
            backend
                .insert_if_absent(LexiconEntry::new(source, target))
                .await
                .unwrap();
        }

        let store = LexiconStore::new(backend, trained_model(), 32);
        TranslationPipeline::new(tokenizer, store, &TranslatorConfig::default())
    }

    #[test]
    fn test_split_chunks_keeps_structure() {
        let chunks = TranslationPipeline::split_chunks("A。B、C！");

        assert_eq!(
            chunks,
            vec![
                Chunk::Text("A".to_string()),
                Chunk::Punct('。'),
                Chunk::Text("B".to_string()),
                Chunk::Punct('、'),
                Chunk::Text("C".to_string()),
                Chunk::Punct('！'),
                Chunk::Text(String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_per_chunk_reversal_preserves_clause_order() {
        let pipeline = seeded_pipeline(Arc::new(StubTokenizer)).await;

        let output = pipeline.translate_sentence("A。B、C！").await.unwrap();

        // Tokens reverse inside each chunk; the chunks themselves do not
        assert_eq!(output, "w2 w1. w3, w4!");
    }

    #[tokio::test]
    async fn test_sentence_without_delimiters_reverses_whole() {
        let pipeline = seeded_pipeline(Arc::new(StubTokenizer)).await;

        let output = pipeline.translate_sentence("t1 t2 t3").await.unwrap();
        assert_eq!(output, "w3 w2 w1");
    }

    #[tokio::test]
    async fn test_consecutive_delimiters_skip_empty_span() {
        let pipeline = seeded_pipeline(Arc::new(StubTokenizer)).await;

        let output = pipeline.translate_sentence("A。。B").await.unwrap();
        assert_eq!(output, "w2 w1. . w3");
    }

    #[tokio::test]
    async fn test_empty_sentence_yields_empty_output() {
        let pipeline = seeded_pipeline(Arc::new(StubTokenizer)).await;
        assert_eq!(pipeline.translate_sentence("").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_whitespace_only_chunk_yields_empty_string() {
        let pipeline = seeded_pipeline(Arc::new(StubTokenizer)).await;
        assert_eq!(pipeline.translate_sentence("   ").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_ascii_and_source_delimiters_share_renderings() {
        let pipeline = seeded_pipeline(Arc::new(StubTokenizer)).await;

        let ascii = pipeline.translate_sentence("t1,t2.t3!t4?").await.unwrap();
        let source = pipeline.translate_sentence("t1、t2。t3！t4？").await.unwrap();
        assert_eq!(ascii, source);
        assert_eq!(ascii, "w1, w2. w3! w4?");
    }

    #[tokio::test]
    async fn test_memoized_translation_is_stable() {
        let backend = Arc::new(MemoryBackend::new());
        let store = LexiconStore::new(backend, trained_model(), 32);
        let pipeline = TranslationPipeline::new(
            Arc::new(StubTokenizer),
            store,
            &TranslatorConfig::default(),
        );

        let first = pipeline.translate_sentence("sun rises, moon sets.").await.unwrap();
        let second = pipeline.translate_sentence("sun rises, moon sets.").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_tokenizer_failure_fails_whole_sentence() {
        struct FailingTokenizer;
        impl Tokenizer for FailingTokenizer {
            fn tokenize(&self, _text: &str) -> Result<Vec<Token>> {
                Err(TranslationError::TokenizeError {
                    message: "analyzer unavailable".to_string(),
                })
            }
        }

        let backend = Arc::new(MemoryBackend::new());
        let store = LexiconStore::new(backend, trained_model(), 32);
        let pipeline = TranslationPipeline::new(
            Arc::new(FailingTokenizer),
            store,
            &TranslatorConfig::default(),
        );

        assert!(pipeline.translate_sentence("anything").await.is_err());
    }
}
