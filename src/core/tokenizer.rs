//! Tokenizer collaborator contract
//!
//! Morphological segmentation is external to this crate: any analyzer that
//! can produce ordered tokens with a surface form and a phonetic reading
//! plugs in behind [`Tokenizer`]. The bundled [`WhitespaceTokenizer`]
//! covers space-delimited scripts, where reading and surface coincide.

use crate::core::errors::Result;
use crate::core::models::Token;

/// Splits a text span into ordered tokens. Implementations may emit
/// whitespace-only tokens; the pipeline filters them.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

/// Default segmentation for scripts without a morphological analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        Ok(text.split_whitespace().map(Token::plain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenizer() {
        let tokens = WhitespaceTokenizer.tokenize("  the quick  fox ").unwrap();

        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["the", "quick", "fox"]);
        assert!(tokens.iter().all(|t| t.reading == t.surface));
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        assert!(WhitespaceTokenizer.tokenize("   ").unwrap().is_empty());
    }
}
