//! Request and response DTOs for the practice API.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::practice::{ChatMessage, PracticeSession, SessionPhase, SessionSummary};
use crate::domain::scenario::{Scenario, ScenarioCatalog, ScenarioCategory};
use crate::domain::translation::{SentenceTranslation, WordTranslation};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub scenario_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveVocabularyRequest {
    pub word: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateWordRequest {
    pub word: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateSentenceRequest {
    pub sentence: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// Snapshot of a practice session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub phase: SessionPhase,
    pub scenario: Option<Scenario>,
    pub messages: Vec<ChatMessage>,
    pub saved_vocabulary: Vec<String>,
    pub corrections: Vec<String>,
    pub summary: Option<SessionSummary>,
    /// A sent message is still waiting for its correction.
    pub correction_pending: bool,
    /// The session has ended and the summary is still being generated.
    pub summary_pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

impl From<&PracticeSession> for SessionResponse {
    fn from(session: &PracticeSession) -> Self {
        Self {
            session_id: session.id().to_string(),
            phase: session.phase(),
            scenario: session.scenario().cloned(),
            messages: session.messages().to_vec(),
            saved_vocabulary: session.saved_vocabulary().to_vec(),
            corrections: session.corrections().to_vec(),
            summary: session.summary().cloned(),
            correction_pending: session.is_correction_pending(),
            summary_pending: session.is_summary_pending(),
            started_at: session.started_at().map(|t| t.as_datetime().to_rfc3339()),
            ended_at: session.ended_at().map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

impl From<PracticeSession> for SessionResponse {
    fn from(session: PracticeSession) -> Self {
        Self::from(&session)
    }
}

/// Result of sending a message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    /// The tutor's reply, absent if the session moved on before it arrived.
    pub reply: Option<ChatMessage>,
    pub session: SessionResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveVocabularyResponse {
    pub added: bool,
    pub session: SessionResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordTranslationResponse {
    pub word: String,
    pub translation: String,
    pub part_of_speech: String,
}

impl WordTranslationResponse {
    pub fn new(word: String, translation: WordTranslation) -> Self {
        Self {
            word,
            translation: translation.translation,
            part_of_speech: translation.part_of_speech,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SentenceTranslationResponse {
    pub translation: String,
}

impl From<SentenceTranslation> for SentenceTranslationResponse {
    fn from(value: SentenceTranslation) -> Self {
        Self {
            translation: value.translation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioCatalogResponse {
    pub categories: Vec<ScenarioCategory>,
}

impl From<&ScenarioCatalog> for ScenarioCatalogResponse {
    fn from(catalog: &ScenarioCatalog) -> Self {
        Self {
            categories: catalog.categories().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

/// Error body returned by every practice endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::scenario::test_scenario;

    #[test]
    fn start_request_reads_camel_case() {
        let req: StartSessionRequest =
            serde_json::from_str(r#"{"scenarioId": "cafe"}"#).unwrap();
        assert_eq!(req.scenario_id, "cafe");
    }

    #[test]
    fn idle_snapshot_serializes_empty_state() {
        let session = PracticeSession::new(SessionId::new());
        let json = serde_json::to_value(SessionResponse::from(&session)).unwrap();

        assert_eq!(json["phase"], "idle");
        assert!(json["scenario"].is_null());
        assert!(json["summary"].is_null());
        assert_eq!(json["correctionPending"], false);
        assert_eq!(json["savedVocabulary"], serde_json::json!([]));
        assert!(json.get("startedAt").is_none());
    }

    #[test]
    fn active_snapshot_includes_welcome() {
        let mut session = PracticeSession::new(SessionId::new());
        session.start(test_scenario()).unwrap();
        let json = serde_json::to_value(SessionResponse::from(&session)).unwrap();

        assert_eq!(json["phase"], "active");
        assert_eq!(json["scenario"]["welcomeMessage"], json["messages"][0]["text"]);
        assert_eq!(json["messages"][0]["role"], "assistant");
        assert!(json["startedAt"].is_string());
    }

    #[test]
    fn word_translation_uses_part_of_speech_key() {
        let response =
            WordTranslationResponse::new("kaffee".to_string(), WordTranslation::new("coffee", "noun"));
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["partOfSpeech"], "noun");
        assert_eq!(json["word"], "kaffee");
    }
}
