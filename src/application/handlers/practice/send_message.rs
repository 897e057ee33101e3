//! SendMessageHandler - Command handler for one learner turn.
//!
//! The user message is appended before the correction request goes out and
//! the session lock is released while the gateway works. The reply (or the
//! rollback on failure) is applied under the turn ticket, so a result that
//! arrives after a reset, restart or end is dropped. If the request itself
//! is abandoned (client gone, request timeout) the turn is rolled back as a
//! failed correction.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::practice::{
    PracticeError, PracticeSession, Rollback, TurnOutcome, TurnTicket,
};
use crate::ports::{
    CorrectionGateway, CorrectionInput, GatewayError, RegistryError, SessionRegistry,
    SharedSession,
};

/// Pause between a successful correction and the tutor reply.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

/// Command to send a learner message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    pub text: String,
}

/// Errors that can occur when sending a message.
#[derive(Debug, Clone, Error)]
pub enum SendMessageError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Practice(#[from] PracticeError),

    /// The correction request failed; the user message was rolled back.
    #[error("Correction failed: {0}")]
    CorrectionFailed(#[from] GatewayError),
}

impl SendMessageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SendMessageError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            SendMessageError::Practice(err) => err.code(),
            SendMessageError::CorrectionFailed(err) => err.code(),
        }
    }
}

impl From<RegistryError> for SendMessageError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => SendMessageError::SessionNotFound(id),
        }
    }
}

/// Result of a turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// `Discarded` when the session moved on while the correction was out.
    pub outcome: TurnOutcome,
    pub session: PracticeSession,
}

/// Handler for learner turns.
pub struct SendMessageHandler {
    registry: Arc<dyn SessionRegistry>,
    gateway: Arc<dyn CorrectionGateway>,
    reply_delay: Duration,
}

impl SendMessageHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>, gateway: Arc<dyn CorrectionGateway>) -> Self {
        Self {
            registry,
            gateway,
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        let shared = self.registry.get(&cmd.session_id).await?;

        let request = {
            let mut session = shared.lock().await;
            session.begin_turn(&cmd.text)?
        };
        let mut guard = TurnGuard::new(shared.clone(), request.ticket, cmd.session_id);

        let input = CorrectionInput {
            session_id: cmd.session_id,
            user_message: request.user_message,
            scenario: request.scenario_title,
        };

        match self.gateway.correct(input).await {
            Ok(correction) => {
                if !self.reply_delay.is_zero() {
                    sleep(self.reply_delay).await;
                }

                let mut session = shared.lock().await;
                guard.disarm();
                let outcome = session.complete_turn(request.ticket, correction);
                match &outcome {
                    TurnOutcome::Applied(reply) => tracing::info!(
                        session_id = %cmd.session_id,
                        corrected = reply.correction.as_ref().map_or(false, |c| c.is_corrected),
                        "Turn completed"
                    ),
                    TurnOutcome::Discarded => tracing::debug!(
                        session_id = %cmd.session_id,
                        ticket_generation = request.ticket.generation(),
                        "Discarded stale correction"
                    ),
                }
                Ok(SendMessageResult {
                    outcome,
                    session: session.clone(),
                })
            }
            Err(err) => {
                tracing::warn!(session_id = %cmd.session_id, error = %err, "Correction failed");

                let mut session = shared.lock().await;
                guard.disarm();
                if session.abort_turn(request.ticket) == Rollback::Discarded {
                    tracing::debug!(session_id = %cmd.session_id, "Session moved on, nothing to roll back");
                }
                Err(SendMessageError::CorrectionFailed(err))
            }
        }
    }
}

/// Rolls an outstanding turn back when the handler future is dropped before
/// the correction has been applied.
struct TurnGuard {
    shared: Option<SharedSession>,
    ticket: TurnTicket,
    session_id: SessionId,
}

impl TurnGuard {
    fn new(shared: SharedSession, ticket: TurnTicket, session_id: SessionId) -> Self {
        Self {
            shared: Some(shared),
            ticket,
            session_id,
        }
    }

    /// Called with the session lock held, right before the turn is settled.
    fn disarm(&mut self) {
        self.shared = None;
    }
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        let Some(shared) = self.shared.take() else {
            return;
        };
        let ticket = self.ticket;
        let session_id = self.session_id;

        if let Ok(mut session) = shared.try_lock() {
            roll_back_abandoned(&mut session, ticket, session_id);
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    let mut session = shared.lock().await;
                    roll_back_abandoned(&mut session, ticket, session_id);
                });
            }
            Err(_) => tracing::error!(
                %session_id,
                "Turn abandoned outside a runtime; correction stays pending until reset"
            ),
        }
    }
}

fn roll_back_abandoned(session: &mut PracticeSession, ticket: TurnTicket, session_id: SessionId) {
    if let Rollback::RolledBack(_) = session.abort_turn(ticket) {
        tracing::warn!(%session_id, "Turn abandoned before the correction arrived; rolled back");
    }
}
