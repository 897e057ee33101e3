//! LLM-backed summary gateway.

use std::sync::Arc;

use async_trait::async_trait;

use super::structured_output::complete_json;
use crate::domain::practice::SessionSummary;
use crate::ports::{
    AIProvider, CompletionRequest, GatewayError, MessageRole, RequestMetadata, SummaryGateway,
    SummaryInput,
};

const SYSTEM_PROMPT: &str = r#"You are an AI language tutor summarizing a German language learning session. Your tone should be encouraging and supportive.

Based on the conversation log, saved vocabulary, and corrections, generate a structured session summary.

1. Performance Overview: Write a brief, encouraging overview of the user's performance.
2. Key Vocabulary: Identify 3-5 important vocabulary words or phrases from the session. Include both saved vocabulary and other relevant terms from the conversation.
3. Grammar Points: Analyze the corrections made. Identify 1-3 recurring grammar or phrasing issues. For each, provide a simple name for the concept (e.g., "Noun Genders") and a very short, clear explanation.
4. Practice Suggestions: Based on the user's performance, provide 2-3 concrete and actionable practice suggestions.

Reply with only a JSON object of this shape:
{"performanceOverview": "...", "keyVocabulary": ["..."], "grammarPoints": [{"point": "...", "explanation": "..."}], "practiceSuggestions": ["..."]}"#;

/// Summary gateway that prompts an [`AIProvider`] for the session recap.
pub struct LlmSummaryGateway {
    provider: Arc<dyn AIProvider>,
}

impl LlmSummaryGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    fn build_request(input: &SummaryInput) -> CompletionRequest {
        let prompt = format!(
            "Conversation Log:\n{}\n\nSaved Vocabulary: {}\nCorrections Made: {}",
            input.conversation_log,
            quoted_list(&input.saved_vocabulary),
            quoted_list(&input.corrections),
        );
        CompletionRequest::new(RequestMetadata::new("summarize").for_session(input.session_id))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(1200)
            .with_temperature(0.4)
    }
}

/// `"a", "b"` rendering used in the prompt.
fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", item))
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl SummaryGateway for LlmSummaryGateway {
    async fn summarize(&self, input: SummaryInput) -> Result<SessionSummary, GatewayError> {
        let request = Self::build_request(&input);
        complete_json(self.provider.as_ref(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::foundation::SessionId;

    fn input() -> SummaryInput {
        SummaryInput {
            session_id: SessionId::new(),
            conversation_log: "assistant: Hallo!\nuser: Ich will einen Kaffee".to_string(),
            saved_vocabulary: vec!["Kaffee".to_string(), "bestellen".to_string()],
            corrections: vec!["'möchte' is more polite than 'will'.".to_string()],
        }
    }

    const SUMMARY_JSON: &str = r#"{
        "performanceOverview": "Great start!",
        "keyVocabulary": ["der Kaffee", "bestellen", "bitte"],
        "grammarPoints": [{"point": "Polite requests", "explanation": "Use 'möchte'."}],
        "practiceSuggestions": ["Order three drinks.", "Practice 'möchte'."]
    }"#;

    #[tokio::test]
    async fn decodes_structured_summary() {
        let provider = MockAIProvider::new().with_response(SUMMARY_JSON);
        let gateway = LlmSummaryGateway::new(Arc::new(provider));

        let summary = gateway.summarize(input()).await.unwrap();

        assert_eq!(summary.performance_overview, "Great start!");
        assert_eq!(summary.key_vocabulary.len(), 3);
        assert_eq!(summary.grammar_points[0].point, "Polite requests");
        assert_eq!(summary.practice_suggestions.len(), 2);
    }

    #[tokio::test]
    async fn list_lengths_are_not_enforced() {
        let provider = MockAIProvider::new().with_response(
            r#"{"performanceOverview": "ok", "keyVocabulary": [], "grammarPoints": [], "practiceSuggestions": []}"#,
        );
        let gateway = LlmSummaryGateway::new(Arc::new(provider));

        let summary = gateway.summarize(input()).await.unwrap();

        assert!(summary.key_vocabulary.is_empty());
    }

    #[tokio::test]
    async fn prompt_lists_vocabulary_and_corrections() {
        let provider = MockAIProvider::new().with_response(SUMMARY_JSON);
        let gateway = LlmSummaryGateway::new(Arc::new(provider.clone()));

        gateway.summarize(input()).await.unwrap();

        let prompt = provider.get_calls()[0].messages[0].content.clone();
        assert!(prompt.contains("Saved Vocabulary: \"Kaffee\", \"bestellen\""));
        assert!(prompt.contains("user: Ich will einen Kaffee"));
    }

    #[tokio::test]
    async fn prose_reply_is_malformed() {
        let provider = MockAIProvider::new().with_response("You did great today!");
        let gateway = LlmSummaryGateway::new(Arc::new(provider));

        let err = gateway.summarize(input()).await.unwrap_err();

        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn timeout_is_unavailable() {
        let provider = MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 30 });
        let gateway = LlmSummaryGateway::new(Arc::new(provider));

        let err = gateway.summarize(input()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Unavailable(_)));
    }

    #[test]
    fn quoted_list_renders_empty_as_blank() {
        assert_eq!(quoted_list(&[]), "");
    }
}
