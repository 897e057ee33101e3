//! Practice session command and query handlers.

mod create_session;
mod delete_session;
mod end_session;
mod get_session;
mod reset_session;
mod save_vocabulary;
mod send_message;
mod start_session;
mod translate_sentence;
mod translate_word;

#[cfg(test)]
mod test_support;

pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use delete_session::{DeleteSessionCommand, DeleteSessionError, DeleteSessionHandler};
pub use end_session::{
    EndSessionCommand, EndSessionError, EndSessionHandler, EndSessionResult, SummaryJob,
    SummaryOutcome,
};
pub use get_session::{GetSessionError, GetSessionHandler, GetSessionQuery};
pub use reset_session::{ResetSessionCommand, ResetSessionError, ResetSessionHandler};
pub use save_vocabulary::{
    SaveVocabularyCommand, SaveVocabularyError, SaveVocabularyHandler, SaveVocabularyResult,
};
pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
    DEFAULT_REPLY_DELAY,
};
pub use start_session::{StartSessionCommand, StartSessionError, StartSessionHandler};
pub use translate_sentence::{
    TranslateSentenceCommand, TranslateSentenceError, TranslateSentenceHandler,
};
pub use translate_word::{
    TranslateWordCommand, TranslateWordError, TranslateWordHandler, TranslateWordResult,
};
