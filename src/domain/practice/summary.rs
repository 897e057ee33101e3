//! End-of-session summary.

use serde::{Deserialize, Serialize};

/// Overview shown when summary generation fails.
pub const FALLBACK_OVERVIEW: &str =
    "We couldn't generate a summary for this session. Please try again.";

/// A grammar or phrasing topic to review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarPoint {
    pub point: String,
    pub explanation: String,
}

/// Structured recap of an ended session.
///
/// List lengths are whatever the generator produced; nothing here enforces
/// the counts the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub performance_overview: String,
    pub key_vocabulary: Vec<String>,
    pub grammar_points: Vec<GrammarPoint>,
    pub practice_suggestions: Vec<String>,
}

impl SessionSummary {
    /// The fixed summary stored when generation fails.
    pub fn fallback() -> Self {
        Self {
            performance_overview: FALLBACK_OVERVIEW.to_string(),
            key_vocabulary: Vec::new(),
            grammar_points: Vec::new(),
            practice_suggestions: Vec::new(),
        }
    }

    /// Returns true if this is the generation-failure placeholder.
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_recognized() {
        assert!(SessionSummary::fallback().is_fallback());

        let real = SessionSummary {
            performance_overview: "Gut gemacht!".to_string(),
            key_vocabulary: vec!["Kaffee".to_string()],
            grammar_points: vec![],
            practice_suggestions: vec![],
        };
        assert!(!real.is_fallback());
    }

    #[test]
    fn summary_deserializes_from_camel_case() {
        let json = r#"{
            "performanceOverview": "Sehr gut!",
            "keyVocabulary": ["bestellen", "die Rechnung"],
            "grammarPoints": [{"point": "Modal verbs", "explanation": "Use möchte to be polite."}],
            "practiceSuggestions": ["Order a meal out loud."]
        }"#;
        let summary: SessionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.key_vocabulary.len(), 2);
        assert_eq!(summary.grammar_points[0].point, "Modal verbs");
    }
}
