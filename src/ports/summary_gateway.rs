//! Summary gateway port.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::foundation::SessionId;
use crate::domain::practice::SessionSummary;

/// Input for summarizing an ended session.
#[derive(Debug, Clone)]
pub struct SummaryInput {
    pub session_id: SessionId,
    /// `role: text` lines, newline separated.
    pub conversation_log: String,
    pub saved_vocabulary: Vec<String>,
    /// Explanations of the corrections made during the session.
    pub corrections: Vec<String>,
}

/// Port for generating the end-of-session recap.
///
/// List lengths are requested from the backing service but not enforced.
#[async_trait]
pub trait SummaryGateway: Send + Sync {
    async fn summarize(&self, input: SummaryInput) -> Result<SessionSummary, GatewayError>;
}
