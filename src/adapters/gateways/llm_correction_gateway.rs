//! LLM-backed correction gateway.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::structured_output::complete_json;
use crate::domain::practice::Correction;
use crate::ports::{
    AIProvider, CompletionRequest, CorrectionGateway, CorrectionInput, GatewayError, MessageRole,
    RequestMetadata,
};

const SYSTEM_PROMPT: &str = r#"You are an expert German language tutor, providing contextual corrections and explanations.

Correct the user's message for grammar and phrasing, providing a short explanation in English. If no correction is needed, indicate that no correction was made.

Reply with only a JSON object with the following keys:
- "correction" (boolean): true if a correction was made, false otherwise.
- "correctedText" (string): The corrected version of the user's message. If no correction was made, this should be the same as the user's message.
- "explanationEn" (string): A short explanation of the correction in English. If no correction was made, this should be an empty string.

Example 1:
{"correction": true, "correctedText": "Ich möchte einen Kaffee, bitte.", "explanationEn": "'möchte' is more polite than 'will'."}

Example 2:
{"correction": false, "correctedText": "Hallo, wie geht es Ihnen?", "explanationEn": ""}"#;

/// Wire shape requested from the model.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorrectionOutput {
    correction: bool,
    corrected_text: String,
    explanation_en: String,
}

/// Correction gateway that prompts an [`AIProvider`] as a German tutor.
pub struct LlmCorrectionGateway {
    provider: Arc<dyn AIProvider>,
}

impl LlmCorrectionGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    fn build_request(input: &CorrectionInput) -> CompletionRequest {
        let prompt = format!(
            "The user is in the following scenario: {}.\n\nUser Message: {}",
            input.scenario, input.user_message
        );
        CompletionRequest::new(RequestMetadata::new("correct").for_session(input.session_id))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(400)
            .with_temperature(0.2)
    }
}

#[async_trait]
impl CorrectionGateway for LlmCorrectionGateway {
    async fn correct(&self, input: CorrectionInput) -> Result<Correction, GatewayError> {
        let request = Self::build_request(&input);
        let output: CorrectionOutput = complete_json(self.provider.as_ref(), request).await?;

        if output.correction && output.corrected_text.trim().is_empty() {
            return Err(GatewayError::malformed("correction without corrected text"));
        }

        Ok(Correction::from_parts(
            &input.user_message,
            output.correction,
            output.corrected_text,
            output.explanation_en,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::foundation::SessionId;

    fn input(text: &str) -> CorrectionInput {
        CorrectionInput {
            session_id: SessionId::new(),
            user_message: text.to_string(),
            scenario: "Café".to_string(),
        }
    }

    fn gateway(provider: &MockAIProvider) -> LlmCorrectionGateway {
        LlmCorrectionGateway::new(Arc::new(provider.clone()))
    }

    #[tokio::test]
    async fn decodes_corrected_output() {
        let provider = MockAIProvider::new().with_response(
            r#"{"correction": true, "correctedText": "Ich möchte einen Kaffee, bitte.", "explanationEn": "'möchte' is more polite than 'will'."}"#,
        );

        let correction = gateway(&provider)
            .correct(input("Ich will einen Kaffee"))
            .await
            .unwrap();

        assert_eq!(
            correction,
            Correction::amended(
                "Ich möchte einen Kaffee, bitte.",
                "'möchte' is more polite than 'will'."
            )
        );
    }

    #[tokio::test]
    async fn uncorrected_output_echoes_user_message() {
        let provider = MockAIProvider::new().with_response(
            r#"{"correction": false, "correctedText": "Hallo, wie geht's?", "explanationEn": "Looks good!"}"#,
        );

        let correction = gateway(&provider)
            .correct(input("Hallo, wie geht es Ihnen?"))
            .await
            .unwrap();

        assert_eq!(correction, Correction::unchanged("Hallo, wie geht es Ihnen?"));
    }

    #[tokio::test]
    async fn prompt_names_scenario_and_message() {
        let provider = MockAIProvider::new().with_response(
            r#"{"correction": false, "correctedText": "", "explanationEn": ""}"#,
        );

        gateway(&provider).correct(input("Guten Tag")).await.unwrap();

        let calls = provider.get_calls();
        let prompt = &calls[0].messages[0].content;
        assert!(prompt.contains("scenario: Café"));
        assert!(prompt.contains("User Message: Guten Tag"));
        assert_eq!(calls[0].metadata.operation, "correct");
    }

    #[tokio::test]
    async fn missing_field_is_malformed() {
        let provider =
            MockAIProvider::new().with_response(r#"{"correction": true, "correctedText": "x"}"#);

        let err = gateway(&provider).correct(input("x")).await.unwrap_err();

        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn empty_corrected_text_is_malformed() {
        let provider = MockAIProvider::new().with_response(
            r#"{"correction": true, "correctedText": " ", "explanationEn": "why"}"#,
        );

        let err = gateway(&provider).correct(input("x")).await.unwrap_err();

        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn provider_outage_is_unavailable() {
        let provider = MockAIProvider::new().with_error(MockError::Network {
            message: "connection refused".into(),
        });

        let err = gateway(&provider).correct(input("x")).await.unwrap_err();

        assert!(matches!(err, GatewayError::Unavailable(_)));
    }
}
