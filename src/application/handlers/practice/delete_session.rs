//! DeleteSessionHandler - Command handler for discarding a session context.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::ports::SessionRegistry;

#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Error)]
pub enum DeleteSessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
}

impl DeleteSessionError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::SessionNotFound
    }
}

/// Handler for deletions. Accepted from every phase; a correction or summary
/// still in flight finishes against the detached session and is lost.
pub struct DeleteSessionHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl DeleteSessionHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: DeleteSessionCommand) -> Result<(), DeleteSessionError> {
        if !self.registry.remove(&cmd.session_id).await {
            return Err(DeleteSessionError::SessionNotFound(cmd.session_id));
        }

        tracing::info!(session_id = %cmd.session_id, "Practice session deleted");
        Ok(())
    }
}
