//! StartSessionHandler - Command handler for starting a scenario.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::practice::{PracticeError, PracticeSession};
use crate::domain::scenario::ScenarioCatalog;
use crate::ports::{RegistryError, SessionRegistry};

/// Command to start practicing a scenario.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub session_id: SessionId,
    pub scenario_id: String,
}

/// Errors that can occur when starting a session.
#[derive(Debug, Clone, Error)]
pub enum StartSessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error(transparent)]
    Practice(#[from] PracticeError),
}

impl StartSessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StartSessionError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            StartSessionError::ScenarioNotFound(_) => ErrorCode::ScenarioNotFound,
            StartSessionError::Practice(err) => err.code(),
        }
    }
}

impl From<RegistryError> for StartSessionError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => StartSessionError::SessionNotFound(id),
        }
    }
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    registry: Arc<dyn SessionRegistry>,
    catalog: Arc<ScenarioCatalog>,
}

impl StartSessionHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>, catalog: Arc<ScenarioCatalog>) -> Self {
        Self { registry, catalog }
    }

    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<PracticeSession, StartSessionError> {
        // Resolve the scenario before touching the session
        let scenario = self
            .catalog
            .find(&cmd.scenario_id)
            .cloned()
            .ok_or_else(|| StartSessionError::ScenarioNotFound(cmd.scenario_id.clone()))?;

        let shared = self.registry.get(&cmd.session_id).await?;
        let mut session = shared.lock().await;
        session.start(scenario)?;

        tracing::info!(
            session_id = %cmd.session_id,
            scenario_id = %cmd.scenario_id,
            generation = session.generation(),
            "Practice session started"
        );
        Ok(session.clone())
    }
}
