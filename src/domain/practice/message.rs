//! Chat messages and the corrections attached to them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        write!(f, "{}", s)
    }
}

/// The tutor's judgment on one user utterance.
///
/// # Invariants
///
/// - when `is_corrected` is false, `corrected_text` equals the original
///   utterance and `explanation` is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    pub is_corrected: bool,
    pub corrected_text: String,
    pub explanation: String,
}

impl Correction {
    /// A correction that amends the utterance.
    pub fn amended(corrected_text: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            is_corrected: true,
            corrected_text: corrected_text.into(),
            explanation: explanation.into(),
        }
    }

    /// The utterance was fine as written.
    pub fn unchanged(original: impl Into<String>) -> Self {
        Self {
            is_corrected: false,
            corrected_text: original.into(),
            explanation: String::new(),
        }
    }

    /// Builds a correction from raw gateway output, normalizing the
    /// "no correction" case against the original utterance.
    pub fn from_parts(
        original: &str,
        is_corrected: bool,
        corrected_text: String,
        explanation: String,
    ) -> Self {
        if is_corrected {
            Self::amended(corrected_text, explanation)
        } else {
            Self::unchanged(original)
        }
    }
}

/// One entry in the session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub correction: Option<Correction>,
}

impl ChatMessage {
    /// A message typed by the learner.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            correction: None,
        }
    }

    /// A plain tutor line, e.g. the scenario welcome.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
            correction: None,
        }
    }

    /// The tutor's reply to a user message: the corrected text with the
    /// correction attached.
    pub fn reply(correction: Correction) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: correction.corrected_text.clone(),
            correction: Some(correction),
        }
    }

    /// `role: text`, the line format used in transcripts.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_normalizes_uncorrected_output() {
        let correction = Correction::from_parts(
            "Hallo, wie geht es Ihnen?",
            false,
            "Hallo, wie geht's?".to_string(),
            "stray".to_string(),
        );
        assert!(!correction.is_corrected);
        assert_eq!(correction.corrected_text, "Hallo, wie geht es Ihnen?");
        assert_eq!(correction.explanation, "");
    }

    #[test]
    fn reply_uses_corrected_text() {
        let reply = ChatMessage::reply(Correction::amended(
            "Ich möchte einen Kaffee, bitte.",
            "'möchte' is more polite than 'will'.",
        ));
        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.text, "Ich möchte einen Kaffee, bitte.");
        assert!(reply.correction.unwrap().is_corrected);
    }

    #[test]
    fn transcript_line_prefixes_role() {
        assert_eq!(ChatMessage::user("Hallo").transcript_line(), "user: Hallo");
        assert_eq!(ChatMessage::assistant("Tag").transcript_line(), "assistant: Tag");
    }

    #[test]
    fn message_without_correction_omits_field() {
        let json = serde_json::to_value(ChatMessage::user("Hallo")).unwrap();
        assert!(json.get("correction").is_none());
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn correction_serializes_camel_case() {
        let json = serde_json::to_value(Correction::unchanged("Hallo")).unwrap();
        assert_eq!(json["isCorrected"], false);
        assert_eq!(json["correctedText"], "Hallo");
    }
}
