//! GetSessionHandler - Query handler for session snapshots.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::practice::PracticeSession;
use crate::ports::{RegistryError, SessionRegistry};

/// Query for the current state of a session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Error)]
pub enum GetSessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
}

impl GetSessionError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::SessionNotFound
    }
}

impl From<RegistryError> for GetSessionError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => GetSessionError::SessionNotFound(id),
        }
    }
}

/// Handler for reading a session snapshot.
///
/// Does not wait for outstanding gateway calls; a pending correction or
/// summary shows up in the snapshot's flags.
pub struct GetSessionHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl GetSessionHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<PracticeSession, GetSessionError> {
        let shared = self.registry.get(&query.session_id).await?;
        let session = shared.lock().await;
        Ok(session.clone())
    }
}
