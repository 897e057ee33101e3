//! Practice-session error types.

use thiserror::Error;

use super::SessionPhase;
use crate::domain::foundation::ErrorCode;

/// Rejected operations on a practice session.
///
/// Every variant is an invalid operation: the session is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PracticeError {
    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: SessionPhase, to: SessionPhase },

    #[error("session is {0}, expected active")]
    NotActive(SessionPhase),

    #[error("no scenario has been started")]
    NotStarted,

    #[error("{0} cannot be blank")]
    BlankInput(&'static str),

    #[error("a correction request is already in flight")]
    CorrectionInFlight,
}

impl PracticeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PracticeError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            PracticeError::NotActive(_) | PracticeError::NotStarted => ErrorCode::InvalidOperation,
            PracticeError::BlankInput(_) => ErrorCode::EmptyField,
            PracticeError::CorrectionInFlight => ErrorCode::CorrectionInFlight,
        }
    }
}
