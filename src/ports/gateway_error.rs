//! Gateway error shared by the correction, summary and translation ports.

use thiserror::Error;

use super::AIError;
use crate::domain::foundation::ErrorCode;

/// Failure of a tutor gateway call.
///
/// Callers never see provider details beyond the message; the session
/// handlers fold every variant into their own failure outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backing service was unreachable, timed out or refused the call.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    /// The service answered but the payload did not match the expected shape.
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Unavailable(_) => ErrorCode::GatewayUnavailable,
            GatewayError::MalformedResponse(_) => ErrorCode::GatewayMalformedResponse,
        }
    }
}

impl From<AIError> for GatewayError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::Parse(message) => GatewayError::MalformedResponse(message),
            other => GatewayError::Unavailable(other.to_string()),
        }
    }
}
