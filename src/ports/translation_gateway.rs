//! Translation gateway ports.
//!
//! Word lookup and sentence translation are separate ports so each can be
//! backed by a different adapter (e.g. the offline dictionary for words).

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::translation::{SentenceTranslation, WordTranslation};

/// Port for single-word lookup.
#[async_trait]
pub trait WordTranslator: Send + Sync {
    /// Translates an already normalized word.
    ///
    /// Unknown words still succeed with `WordTranslation::unknown`.
    async fn translate_word(&self, word: &str) -> Result<WordTranslation, GatewayError>;
}

/// Port for whole-sentence translation.
#[async_trait]
pub trait SentenceTranslator: Send + Sync {
    /// Translates the sentence as written.
    async fn translate_sentence(&self, sentence: &str)
        -> Result<SentenceTranslation, GatewayError>;
}
