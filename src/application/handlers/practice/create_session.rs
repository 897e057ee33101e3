//! CreateSessionHandler - Command handler for opening a practice session context.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::SessionRegistry;

/// Command to create an idle practice session.
#[derive(Debug, Clone, Default)]
pub struct CreateSessionCommand;

/// Result of session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session_id: SessionId,
}

/// Handler for creating practice sessions.
pub struct CreateSessionHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl CreateSessionHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, _cmd: CreateSessionCommand) -> CreateSessionResult {
        let session_id = self.registry.create().await;
        tracing::info!(%session_id, "Practice session created");
        CreateSessionResult { session_id }
    }
}
