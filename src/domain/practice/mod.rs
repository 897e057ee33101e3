//! Practice module - the conversation-practice session and its values.
//!
//! # Module Organization
//!
//! - `phase` - session lifecycle state machine
//! - `message` - transcript entries and corrections
//! - `vocabulary` - saved words
//! - `summary` - end-of-session recap
//! - `session` - the `PracticeSession` aggregate

mod errors;
mod message;
mod phase;
mod session;
mod summary;
mod vocabulary;

pub use errors::PracticeError;
pub use message::{ChatMessage, ChatRole, Correction};
pub use phase::SessionPhase;
pub use session::{
    PracticeSession, Rollback, SummaryRequest, SummaryTicket, TurnOutcome, TurnRequest,
    TurnTicket,
};
pub use summary::{GrammarPoint, SessionSummary, FALLBACK_OVERVIEW};
pub use vocabulary::VocabularyList;
