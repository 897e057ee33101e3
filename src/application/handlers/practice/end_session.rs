//! EndSessionHandler - Command handler for ending a session.
//!
//! Ending is split in two: `handle` moves the session to `ended` at once
//! and returns a [`SummaryJob`]; running the job calls the summary gateway
//! and stores the summary, or the fallback if generation fails. The HTTP
//! adapter spawns the job so the response does not wait on the model.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::practice::{PracticeError, PracticeSession, SessionSummary, SummaryRequest};
use crate::ports::{RegistryError, SessionRegistry, SharedSession, SummaryGateway, SummaryInput};

/// Command to end the active session.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Error)]
pub enum EndSessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Practice(#[from] PracticeError),
}

impl EndSessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EndSessionError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            EndSessionError::Practice(err) => err.code(),
        }
    }
}

impl From<RegistryError> for EndSessionError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => EndSessionError::SessionNotFound(id),
        }
    }
}

/// Result of ending a session.
pub struct EndSessionResult {
    /// Snapshot taken right after the phase change.
    pub session: PracticeSession,
    pub job: SummaryJob,
}

/// How a summary job finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOutcome {
    Generated,
    Fallback,
    /// The session was reset or restarted before the summary arrived.
    Discarded,
}

/// Pending summary generation for an ended session.
pub struct SummaryJob {
    session_id: SessionId,
    session: SharedSession,
    gateway: Arc<dyn SummaryGateway>,
    request: SummaryRequest,
}

impl SummaryJob {
    pub async fn run(self) -> SummaryOutcome {
        let input = SummaryInput {
            session_id: self.session_id,
            conversation_log: self.request.conversation_log,
            saved_vocabulary: self.request.saved_vocabulary,
            corrections: self.request.corrections,
        };

        let (summary, outcome) = match self.gateway.summarize(input).await {
            Ok(summary) => (summary, SummaryOutcome::Generated),
            Err(err) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    error = %err,
                    "Summary generation failed, storing fallback"
                );
                (SessionSummary::fallback(), SummaryOutcome::Fallback)
            }
        };

        let mut session = self.session.lock().await;
        if session.apply_summary(self.request.ticket, summary) {
            tracing::info!(session_id = %self.session_id, ?outcome, "Session summary stored");
            outcome
        } else {
            tracing::debug!(session_id = %self.session_id, "Discarded stale summary");
            SummaryOutcome::Discarded
        }
    }
}

/// Handler for ending sessions.
pub struct EndSessionHandler {
    registry: Arc<dyn SessionRegistry>,
    gateway: Arc<dyn SummaryGateway>,
}

impl EndSessionHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>, gateway: Arc<dyn SummaryGateway>) -> Self {
        Self { registry, gateway }
    }

    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<EndSessionResult, EndSessionError> {
        let shared = self.registry.get(&cmd.session_id).await?;

        let (request, snapshot) = {
            let mut session = shared.lock().await;
            let request = session.end()?;
            (request, session.clone())
        };

        tracing::info!(
            session_id = %cmd.session_id,
            messages = snapshot.messages().len(),
            corrections = snapshot.corrections().len(),
            "Practice session ended"
        );

        Ok(EndSessionResult {
            session: snapshot,
            job: SummaryJob {
                session_id: cmd.session_id,
                session: shared,
                gateway: self.gateway.clone(),
                request,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{active_session, StubSummaryGateway};
    use super::*;
    use crate::domain::practice::{Correction, SessionPhase};
    use crate::domain::scenario::test_scenario;
    use crate::ports::GatewayError;

    fn summary() -> SessionSummary {
        SessionSummary {
            performance_overview: "Sehr gut!".to_string(),
            key_vocabulary: vec!["der Kaffee".to_string()],
            grammar_points: vec![],
            practice_suggestions: vec!["Order a tea.".to_string()],
        }
    }

    #[tokio::test]
    async fn phase_is_ended_before_summary_runs() {
        let (registry, session_id) = active_session().await;
        let handler = EndSessionHandler::new(
            registry,
            Arc::new(StubSummaryGateway::new(Ok(summary()))),
        );

        let result = handler.handle(EndSessionCommand { session_id }).await.unwrap();

        assert_eq!(result.session.phase(), SessionPhase::Ended);
        assert!(result.session.is_summary_pending());
        assert!(result.session.summary().is_none());
    }

    #[tokio::test]
    async fn job_stores_generated_summary() {
        let (registry, session_id) = active_session().await;
        let gateway = Arc::new(StubSummaryGateway::new(Ok(summary())));
        {
            let shared = registry.get(&session_id).await.unwrap();
            let mut session = shared.lock().await;
            session.save_vocabulary("Kaffee").unwrap();
            let turn = session.begin_turn("Ich will einen Kaffee").unwrap();
            session.complete_turn(
                turn.ticket,
                Correction::amended("Ich möchte einen Kaffee.", "Use 'möchte'."),
            );
        }
        let handler = EndSessionHandler::new(registry.clone(), gateway.clone());

        let result = handler.handle(EndSessionCommand { session_id }).await.unwrap();
        let outcome = result.job.run().await;

        assert_eq!(outcome, SummaryOutcome::Generated);
        let input = &gateway.inputs()[0];
        assert_eq!(input.saved_vocabulary, vec!["Kaffee".to_string()]);
        assert_eq!(input.corrections, vec!["Use 'möchte'.".to_string()]);
        assert_eq!(input.conversation_log.lines().count(), 3);
        assert!(input.conversation_log.starts_with("assistant: "));

        let shared = registry.get(&session_id).await.unwrap();
        let session = shared.lock().await;
        assert_eq!(session.summary(), Some(&summary()));
        assert_eq!(session.phase(), SessionPhase::Ended);
    }

    #[tokio::test]
    async fn failed_generation_stores_fallback() {
        let (registry, session_id) = active_session().await;
        let gateway = Arc::new(StubSummaryGateway::new(Err(GatewayError::malformed("prose"))));
        let handler = EndSessionHandler::new(registry.clone(), gateway);

        let result = handler.handle(EndSessionCommand { session_id }).await.unwrap();

        assert_eq!(result.job.run().await, SummaryOutcome::Fallback);
        let shared = registry.get(&session_id).await.unwrap();
        let session = shared.lock().await;
        assert!(session.summary().unwrap().is_fallback());
        assert_eq!(session.phase(), SessionPhase::Ended);
    }

    #[tokio::test]
    async fn summary_after_restart_is_discarded() {
        let (registry, session_id) = active_session().await;
        let handler = EndSessionHandler::new(
            registry.clone(),
            Arc::new(StubSummaryGateway::new(Ok(summary()))),
        );
        let result = handler.handle(EndSessionCommand { session_id }).await.unwrap();

        let shared = registry.get(&session_id).await.unwrap();
        shared.lock().await.start(test_scenario()).unwrap();

        assert_eq!(result.job.run().await, SummaryOutcome::Discarded);
        assert!(shared.lock().await.summary().is_none());
    }

    #[tokio::test]
    async fn ending_twice_is_rejected() {
        let (registry, session_id) = active_session().await;
        let handler = EndSessionHandler::new(
            registry,
            Arc::new(StubSummaryGateway::new(Ok(summary()))),
        );
        handler.handle(EndSessionCommand { session_id }).await.unwrap();

        let err = handler
            .handle(EndSessionCommand { session_id })
            .await
            .err()
            .unwrap();

        assert_eq!(err.code(), ErrorCode::InvalidOperation);
    }
}
