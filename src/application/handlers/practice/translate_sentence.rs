//! TranslateSentenceHandler - Query handler for sentence translation.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::translation::SentenceTranslation;
use crate::ports::{GatewayError, SentenceTranslator};

#[derive(Debug, Clone)]
pub struct TranslateSentenceCommand {
    pub sentence: String,
}

#[derive(Debug, Clone, Error)]
pub enum TranslateSentenceError {
    #[error("sentence cannot be blank")]
    BlankSentence,

    #[error("Translation failed: {0}")]
    Gateway(#[from] GatewayError),
}

impl TranslateSentenceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TranslateSentenceError::BlankSentence => ErrorCode::EmptyField,
            TranslateSentenceError::Gateway(err) => err.code(),
        }
    }
}

/// Handler for sentence translation. The sentence is passed as written.
pub struct TranslateSentenceHandler {
    translator: Arc<dyn SentenceTranslator>,
}

impl TranslateSentenceHandler {
    pub fn new(translator: Arc<dyn SentenceTranslator>) -> Self {
        Self { translator }
    }

    pub async fn handle(
        &self,
        cmd: TranslateSentenceCommand,
    ) -> Result<SentenceTranslation, TranslateSentenceError> {
        if cmd.sentence.trim().is_empty() {
            return Err(TranslateSentenceError::BlankSentence);
        }

        self.translator
            .translate_sentence(&cmd.sentence)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Sentence translation failed");
                err.into()
            })
    }
}
