//! SaveVocabularyHandler - Command handler for saving a word.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::practice::{PracticeError, PracticeSession};
use crate::ports::{RegistryError, SessionRegistry};

/// Command to save a word to the session's vocabulary list.
#[derive(Debug, Clone)]
pub struct SaveVocabularyCommand {
    pub session_id: SessionId,
    /// Stored as typed; duplicates are detected case-sensitively.
    pub word: String,
}

#[derive(Debug, Clone, Error)]
pub enum SaveVocabularyError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Practice(#[from] PracticeError),
}

impl SaveVocabularyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SaveVocabularyError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            SaveVocabularyError::Practice(err) => err.code(),
        }
    }
}

impl From<RegistryError> for SaveVocabularyError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => SaveVocabularyError::SessionNotFound(id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveVocabularyResult {
    /// False when the word was already saved.
    pub added: bool,
    pub session: PracticeSession,
}

/// Handler for saving vocabulary.
pub struct SaveVocabularyHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl SaveVocabularyHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: SaveVocabularyCommand,
    ) -> Result<SaveVocabularyResult, SaveVocabularyError> {
        let shared = self.registry.get(&cmd.session_id).await?;
        let mut session = shared.lock().await;
        let added = session.save_vocabulary(&cmd.word)?;

        if added {
            tracing::debug!(session_id = %cmd.session_id, word = %cmd.word, "Vocabulary saved");
        }
        Ok(SaveVocabularyResult {
            added,
            session: session.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::active_session;
    use super::*;
    use crate::adapters::storage::InMemorySessionRegistry;

    fn cmd(session_id: SessionId, word: &str) -> SaveVocabularyCommand {
        SaveVocabularyCommand {
            session_id,
            word: word.to_string(),
        }
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_entry() {
        let (registry, session_id) = active_session().await;
        let handler = SaveVocabularyHandler::new(registry);

        let first = handler.handle(cmd(session_id, "Kaffee")).await.unwrap();
        let second = handler.handle(cmd(session_id, "Kaffee")).await.unwrap();

        assert!(first.added);
        assert!(!second.added);
        assert_eq!(second.session.saved_vocabulary(), &["Kaffee".to_string()]);
    }

    #[tokio::test]
    async fn case_variants_are_distinct() {
        let (registry, session_id) = active_session().await;
        let handler = SaveVocabularyHandler::new(registry);

        handler.handle(cmd(session_id, "Kaffee")).await.unwrap();
        let result = handler.handle(cmd(session_id, "kaffee")).await.unwrap();

        assert_eq!(result.session.saved_vocabulary().len(), 2);
    }

    #[tokio::test]
    async fn blank_word_is_rejected() {
        let (registry, session_id) = active_session().await;
        let handler = SaveVocabularyHandler::new(registry);

        let err = handler.handle(cmd(session_id, " ")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::EmptyField);
    }

    #[tokio::test]
    async fn idle_session_is_rejected() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let session_id = registry.create().await;
        let handler = SaveVocabularyHandler::new(registry);

        let err = handler.handle(cmd(session_id, "Kaffee")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidOperation);
    }
}
