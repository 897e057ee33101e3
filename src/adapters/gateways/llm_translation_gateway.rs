//! LLM-backed word and sentence translation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::structured_output::complete_json;
use crate::domain::translation::{SentenceTranslation, WordTranslation, UNKNOWN_PART_OF_SPEECH};
use crate::ports::{
    AIProvider, CompletionRequest, GatewayError, MessageRole, RequestMetadata,
    SentenceTranslator, WordTranslator,
};

const WORD_PROMPT: &str = r#"You are a German to English dictionary. Provide the most common English translation and part of speech for the given German word.

Reply with only a JSON object with the following keys:
- "translation": The English translation.
- "pos": The part of speech (noun, verb, adjective, adverb, etc.).

Example:
German Word: "Haus"
{"translation": "house", "pos": "noun"}"#;

const SENTENCE_PROMPT: &str = r#"You are a German to English translator. Provide the English translation for the given German sentence.

Reply with only a JSON object with the following key:
- "translation": The English translation.

Example:
German Sentence: "Was möchten Sie bestellen?"
{"translation": "What would you like to order?"}"#;

#[derive(Debug, Deserialize)]
struct WordOutput {
    translation: String,
    #[serde(alias = "partOfSpeech")]
    pos: String,
}

#[derive(Debug, Deserialize)]
struct SentenceOutput {
    translation: String,
}

/// Translation gateway that prompts an [`AIProvider`].
pub struct LlmTranslationGateway {
    provider: Arc<dyn AIProvider>,
}

impl LlmTranslationGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl WordTranslator for LlmTranslationGateway {
    async fn translate_word(&self, word: &str) -> Result<WordTranslation, GatewayError> {
        let request = CompletionRequest::new(RequestMetadata::new("translate_word"))
            .with_system_prompt(WORD_PROMPT)
            .with_message(MessageRole::User, format!("German Word: \"{}\"", word))
            .with_max_tokens(100)
            .with_temperature(0.0);

        let output: WordOutput = complete_json(self.provider.as_ref(), request).await?;

        if output.translation.trim().is_empty() {
            return Ok(WordTranslation::unknown(word));
        }
        let pos = if output.pos.trim().is_empty() {
            UNKNOWN_PART_OF_SPEECH.to_string()
        } else {
            output.pos
        };
        Ok(WordTranslation::new(output.translation, pos))
    }
}

#[async_trait]
impl SentenceTranslator for LlmTranslationGateway {
    async fn translate_sentence(
        &self,
        sentence: &str,
    ) -> Result<SentenceTranslation, GatewayError> {
        let request = CompletionRequest::new(RequestMetadata::new("translate_sentence"))
            .with_system_prompt(SENTENCE_PROMPT)
            .with_message(MessageRole::User, format!("German Sentence: \"{}\"", sentence))
            .with_max_tokens(300)
            .with_temperature(0.0);

        let output: SentenceOutput = complete_json(self.provider.as_ref(), request).await?;

        if output.translation.trim().is_empty() {
            return Err(GatewayError::malformed("empty translation"));
        }
        Ok(SentenceTranslation::new(output.translation))
    }
}
