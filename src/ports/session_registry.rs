//! Session registry port.
//!
//! Maps session ids to the owned context of each practice session. Callers
//! lock the session for each state change and release the lock before any
//! gateway call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::practice::PracticeSession;

/// Shared handle to one practice session.
pub type SharedSession = Arc<Mutex<PracticeSession>>;

/// Errors from registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("session not found: {0}")]
    NotFound(SessionId),
}

/// Registry of live practice sessions.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Creates an idle session and returns its id.
    async fn create(&self) -> SessionId;

    /// Looks up a session and marks it as recently used.
    async fn get(&self, id: &SessionId) -> Result<SharedSession, RegistryError>;

    /// Drops a session; returns false if it did not exist.
    async fn remove(&self, id: &SessionId) -> bool;

    /// Drops every session not looked up within `max_idle`; returns the
    /// evicted ids.
    async fn evict_idle(&self, max_idle: Duration) -> Vec<SessionId>;

    /// Number of live sessions.
    async fn len(&self) -> usize;
}
