//! TranslateWordHandler - Query handler for word lookups.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::translation::{normalize_word, WordTranslation};
use crate::ports::{GatewayError, WordTranslator};

#[derive(Debug, Clone)]
pub struct TranslateWordCommand {
    /// The word as selected in the transcript, punctuation included.
    pub word: String,
}

#[derive(Debug, Clone, Error)]
pub enum TranslateWordError {
    #[error("Nothing to translate in {0:?}")]
    EmptyWord(String),

    #[error("Translation failed: {0}")]
    Gateway(#[from] GatewayError),
}

impl TranslateWordError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TranslateWordError::EmptyWord(_) => ErrorCode::InvalidOperation,
            TranslateWordError::Gateway(err) => err.code(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslateWordResult {
    /// The normalized form that was looked up.
    pub word: String,
    pub translation: WordTranslation,
}

/// Handler for word translation. Never touches session state.
pub struct TranslateWordHandler {
    translator: Arc<dyn WordTranslator>,
}

impl TranslateWordHandler {
    pub fn new(translator: Arc<dyn WordTranslator>) -> Self {
        Self { translator }
    }

    pub async fn handle(
        &self,
        cmd: TranslateWordCommand,
    ) -> Result<TranslateWordResult, TranslateWordError> {
        let word = normalize_word(&cmd.word);
        if word.is_empty() {
            return Err(TranslateWordError::EmptyWord(cmd.word));
        }

        let translation = self.translator.translate_word(&word).await.map_err(|err| {
            tracing::warn!(%word, error = %err, "Word translation failed");
            err
        })?;

        Ok(TranslateWordResult { word, translation })
    }
}
