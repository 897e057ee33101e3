//! HTTP handlers for practice endpoints.
//!
//! These handlers connect Axum routes to the practice command/query handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::practice::{
    CreateSessionCommand, CreateSessionHandler, DeleteSessionCommand, DeleteSessionError,
    DeleteSessionHandler, EndSessionCommand, EndSessionError,
    EndSessionHandler, GetSessionError, GetSessionHandler, GetSessionQuery, ResetSessionCommand,
    ResetSessionError, ResetSessionHandler, SaveVocabularyCommand, SaveVocabularyError,
    SaveVocabularyHandler, SendMessageCommand, SendMessageError, SendMessageHandler,
    StartSessionCommand, StartSessionError, StartSessionHandler, TranslateSentenceCommand,
    TranslateSentenceError, TranslateSentenceHandler, TranslateWordCommand, TranslateWordError,
    TranslateWordHandler, DEFAULT_REPLY_DELAY,
};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::practice::TurnOutcome;
use crate::domain::scenario::ScenarioCatalog;
use crate::ports::{
    CorrectionGateway, SentenceTranslator, SessionRegistry, SummaryGateway, WordTranslator,
};

use super::dto::{
    ErrorResponse, HealthResponse, SaveVocabularyRequest, SaveVocabularyResponse,
    ScenarioCatalogResponse, SendMessageRequest, SendMessageResponse,
    SentenceTranslationResponse, SessionResponse, StartSessionRequest, TranslateSentenceRequest,
    TranslateWordRequest, WordTranslationResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the practice API.
///
/// Cloned for each request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct PracticeAppState {
    pub registry: Arc<dyn SessionRegistry>,
    pub catalog: Arc<ScenarioCatalog>,
    pub correction_gateway: Arc<dyn CorrectionGateway>,
    pub summary_gateway: Arc<dyn SummaryGateway>,
    pub word_translator: Arc<dyn WordTranslator>,
    pub sentence_translator: Arc<dyn SentenceTranslator>,
    pub reply_delay: Duration,
}

impl PracticeAppState {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        catalog: Arc<ScenarioCatalog>,
        correction_gateway: Arc<dyn CorrectionGateway>,
        summary_gateway: Arc<dyn SummaryGateway>,
        word_translator: Arc<dyn WordTranslator>,
        sentence_translator: Arc<dyn SentenceTranslator>,
    ) -> Self {
        Self {
            registry,
            catalog,
            correction_gateway,
            summary_gateway,
            word_translator,
            sentence_translator,
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Create handlers on demand from the shared state.
    pub fn create_session_handler(&self) -> CreateSessionHandler {
        CreateSessionHandler::new(self.registry.clone())
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.registry.clone())
    }

    pub fn start_session_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.registry.clone(), self.catalog.clone())
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.registry.clone(), self.correction_gateway.clone())
            .with_reply_delay(self.reply_delay)
    }

    pub fn save_vocabulary_handler(&self) -> SaveVocabularyHandler {
        SaveVocabularyHandler::new(self.registry.clone())
    }

    pub fn end_session_handler(&self) -> EndSessionHandler {
        EndSessionHandler::new(self.registry.clone(), self.summary_gateway.clone())
    }

    pub fn delete_session_handler(&self) -> DeleteSessionHandler {
        DeleteSessionHandler::new(self.registry.clone())
    }

    pub fn reset_session_handler(&self) -> ResetSessionHandler {
        ResetSessionHandler::new(self.registry.clone())
    }

    pub fn translate_word_handler(&self) -> TranslateWordHandler {
        TranslateWordHandler::new(self.word_translator.clone())
    }

    pub fn translate_sentence_handler(&self) -> TranslateSentenceHandler {
        TranslateSentenceHandler::new(self.sentence_translator.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health(State(state): State<PracticeAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        sessions: state.registry.len().await,
    })
}

/// GET /api/scenarios
pub async fn list_scenarios(State(state): State<PracticeAppState>) -> impl IntoResponse {
    Json(ScenarioCatalogResponse::from(state.catalog.as_ref()))
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<PracticeAppState>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let result = state
        .create_session_handler()
        .handle(CreateSessionCommand)
        .await;
    let session = state
        .get_session_handler()
        .handle(GetSessionQuery {
            session_id: result.session_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<PracticeAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let session_id = parse_session_id(&session_id)?;
    let session = state
        .get_session_handler()
        .handle(GetSessionQuery { session_id })
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// POST /api/sessions/:id/start
pub async fn start_session(
    State(state): State<PracticeAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<StartSessionRequest>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let session_id = parse_session_id(&session_id)?;
    let session = state
        .start_session_handler()
        .handle(StartSessionCommand {
            session_id,
            scenario_id: req.scenario_id,
        })
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// POST /api/sessions/:id/messages
pub async fn send_message(
    State(state): State<PracticeAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = state
        .send_message_handler()
        .handle(SendMessageCommand {
            session_id,
            text: req.text,
        })
        .await?;

    let reply = match result.outcome {
        TurnOutcome::Applied(reply) => Some(reply),
        TurnOutcome::Discarded => None,
    };
    Ok(Json(SendMessageResponse {
        reply,
        session: result.session.into(),
    }))
}

/// POST /api/sessions/:id/vocabulary
pub async fn save_vocabulary(
    State(state): State<PracticeAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SaveVocabularyRequest>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = state
        .save_vocabulary_handler()
        .handle(SaveVocabularyCommand {
            session_id,
            word: req.word,
        })
        .await?;

    Ok(Json(SaveVocabularyResponse {
        added: result.added,
        session: result.session.into(),
    }))
}

/// POST /api/sessions/:id/end
///
/// Responds 202 as soon as the session is ended; the summary is generated
/// in the background and shows up on the snapshot when ready.
pub async fn end_session(
    State(state): State<PracticeAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = state
        .end_session_handler()
        .handle(EndSessionCommand { session_id })
        .await?;

    tokio::spawn(result.job.run());

    Ok((StatusCode::ACCEPTED, Json(SessionResponse::from(result.session))))
}

/// POST /api/sessions/:id/reset
pub async fn reset_session(
    State(state): State<PracticeAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let session_id = parse_session_id(&session_id)?;
    let session = state
        .reset_session_handler()
        .handle(ResetSessionCommand { session_id })
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(state): State<PracticeAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let session_id = parse_session_id(&session_id)?;
    state
        .delete_session_handler()
        .handle(DeleteSessionCommand { session_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/translate/word
pub async fn translate_word(
    State(state): State<PracticeAppState>,
    Json(req): Json<TranslateWordRequest>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let result = state
        .translate_word_handler()
        .handle(TranslateWordCommand { word: req.word })
        .await?;

    Ok(Json(WordTranslationResponse::new(
        result.word,
        result.translation,
    )))
}

/// POST /api/translate/sentence
pub async fn translate_sentence(
    State(state): State<PracticeAppState>,
    Json(req): Json<TranslateSentenceRequest>,
) -> Result<impl IntoResponse, PracticeApiError> {
    let translation = state
        .translate_sentence_handler()
        .handle(TranslateSentenceCommand {
            sentence: req.sentence,
        })
        .await?;

    Ok(Json(SentenceTranslationResponse::from(translation)))
}

fn parse_session_id(raw: &str) -> Result<SessionId, PracticeApiError> {
    raw.parse::<SessionId>().map_err(|_| {
        PracticeApiError::new(
            ErrorCode::InvalidFormat,
            format!("Invalid session ID: {}", raw),
        )
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error carrying an error code and a user-facing message.
#[derive(Debug)]
pub struct PracticeApiError {
    code: ErrorCode,
    message: String,
}

impl PracticeApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::SessionNotFound | ErrorCode::ScenarioNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition
        | ErrorCode::InvalidOperation
        | ErrorCode::CorrectionInFlight => StatusCode::CONFLICT,
        ErrorCode::GatewayUnavailable | ErrorCode::GatewayMalformedResponse => {
            StatusCode::BAD_GATEWAY
        }
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

macro_rules! impl_from_handler_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl From<$error> for PracticeApiError {
                fn from(err: $error) -> Self {
                    Self::new(err.code(), err.to_string())
                }
            }
        )*
    };
}

impl_from_handler_error!(
    GetSessionError,
    StartSessionError,
    SendMessageError,
    SaveVocabularyError,
    EndSessionError,
    ResetSessionError,
    DeleteSessionError,
    TranslateWordError,
    TranslateSentenceError,
);

impl IntoResponse for PracticeApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = %self.code, message = %self.message, "Request failed");
        }
        let body = ErrorResponse::new(self.code.to_string(), self.message);
        (status, Json(body)).into_response()
    }
}
