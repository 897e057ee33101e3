//! In-Memory Session Registry Adapter
//!
//! Holds every live practice session in process memory. Sessions are lost
//! on restart. Each entry remembers when it was last looked up so idle
//! sessions can be evicted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::domain::foundation::SessionId;
use crate::domain::practice::PracticeSession;
use crate::ports::{RegistryError, SessionRegistry, SharedSession};

#[derive(Debug)]
struct Entry {
    session: SharedSession,
    last_used: Instant,
}

/// In-memory registry of practice sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
}

impl InMemorySessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn create(&self) -> SessionId {
        let id = SessionId::new();
        let entry = Entry {
            session: Arc::new(Mutex::new(PracticeSession::new(id))),
            last_used: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        id
    }

    async fn get(&self, id: &SessionId) -> Result<SharedSession, RegistryError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id).ok_or(RegistryError::NotFound(*id))?;
        entry.last_used = Instant::now();
        Ok(entry.session.clone())
    }

    async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    async fn evict_idle(&self, max_idle: Duration) -> Vec<SessionId> {
        let mut sessions = self.sessions.write().await;
        let idle: Vec<SessionId> = sessions
            .iter()
            .filter(|(_, entry)| entry.last_used.elapsed() > max_idle)
            .map(|(id, _)| *id)
            .collect();
        for id in &idle {
            sessions.remove(id);
        }
        idle
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
