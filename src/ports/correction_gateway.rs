//! Correction gateway port.
//!
//! Judges one learner utterance in the context of a scenario and returns
//! the corrected utterance with an English explanation.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::foundation::SessionId;
use crate::domain::practice::Correction;

/// Input for one correction call.
#[derive(Debug, Clone)]
pub struct CorrectionInput {
    pub session_id: SessionId,
    pub user_message: String,
    /// Scenario title, e.g. "Café".
    pub scenario: String,
}

/// Port for grammar correction of learner utterances.
///
/// Implementations must return `Correction::unchanged(user_message)` when
/// the utterance needs no correction, whatever the backing service says.
#[async_trait]
pub trait CorrectionGateway: Send + Sync {
    async fn correct(&self, input: CorrectionInput) -> Result<Correction, GatewayError>;
}
