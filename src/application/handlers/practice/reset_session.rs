//! ResetSessionHandler - Command handler for returning to scenario selection.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::practice::PracticeSession;
use crate::ports::{RegistryError, SessionRegistry};

#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Error)]
pub enum ResetSessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
}

impl ResetSessionError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::SessionNotFound
    }
}

impl From<RegistryError> for ResetSessionError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => ResetSessionError::SessionNotFound(id),
        }
    }
}

/// Handler for resets. Accepted from every phase.
pub struct ResetSessionHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl ResetSessionHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: ResetSessionCommand,
    ) -> Result<PracticeSession, ResetSessionError> {
        let shared = self.registry.get(&cmd.session_id).await?;
        let mut session = shared.lock().await;
        let from = session.phase();
        session.reset();

        tracing::info!(session_id = %cmd.session_id, %from, "Practice session reset");
        Ok(session.clone())
    }
}
