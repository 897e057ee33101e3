//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::practice::{
    CreateSessionCommand, CreateSessionHandler, EndSessionCommand, EndSessionHandler,
    GetSessionHandler, GetSessionQuery, ResetSessionCommand, ResetSessionHandler,
    SaveVocabularyCommand, SaveVocabularyHandler, SendMessageCommand, SendMessageHandler,
    StartSessionCommand, StartSessionHandler, SummaryJob, SummaryOutcome,
    TranslateSentenceCommand, TranslateSentenceHandler, TranslateWordCommand,
    TranslateWordHandler,
};
