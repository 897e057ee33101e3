//! Axum router configuration for practice endpoints.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_session, delete_session, end_session, get_session, health, list_scenarios,
    reset_session, save_vocabulary, send_message, start_session, translate_sentence,
    translate_word, PracticeAppState,
};

/// Create the practice API router.
///
/// # Routes
///
/// - `GET /scenarios` - Scenario catalog
/// - `POST /sessions` - Create an idle session
/// - `GET /sessions/:id` - Session snapshot
/// - `DELETE /sessions/:id` - Discard a session
/// - `POST /sessions/:id/start` - Start a scenario
/// - `POST /sessions/:id/messages` - Send a message and wait for the correction
/// - `POST /sessions/:id/vocabulary` - Save a word
/// - `POST /sessions/:id/end` - End the session (202, summary follows)
/// - `POST /sessions/:id/reset` - Back to scenario selection
/// - `POST /translate/word` - Translate one word
/// - `POST /translate/sentence` - Translate a sentence
pub fn practice_routes() -> Router<PracticeAppState> {
    Router::new()
        .route("/scenarios", get(list_scenarios))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(delete_session))
        .route("/sessions/:id/start", post(start_session))
        .route("/sessions/:id/messages", post(send_message))
        .route("/sessions/:id/vocabulary", post(save_vocabulary))
        .route("/sessions/:id/end", post(end_session))
        .route("/sessions/:id/reset", post(reset_session))
        .route("/translate/word", post(translate_word))
        .route("/translate/sentence", post(translate_sentence))
}

/// HTTP options applied around the practice routes.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    /// Allowed origins; any origin is allowed when empty.
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            cors_origins: Vec::new(),
        }
    }
}

/// Create the complete application router.
///
/// Mounts the practice API at `/api` and the liveness probe at `/health`.
pub fn practice_router(state: PracticeAppState, options: RouterOptions) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", practice_routes())
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}
