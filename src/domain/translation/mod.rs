//! Translation module - lookup values and word normalization.
//!
//! Translations are ephemeral: they are returned to the caller and never
//! stored in a practice session.

use serde::{Deserialize, Serialize};

/// Punctuation stripped from both ends of a word before lookup.
const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Part of speech reported for words the gateway cannot classify.
pub const UNKNOWN_PART_OF_SPEECH: &str = "unknown";

/// Normalizes a selected word for lookup.
///
/// Lower-cases and strips surrounding whitespace and sentence punctuation,
/// so `"Kaffee."` and `"kaffee"` resolve to the same entry. Punctuation
/// inside the word is kept.
pub fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c))
        .to_lowercase()
}

/// Translation of a single German word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordTranslation {
    pub translation: String,
    pub part_of_speech: String,
}

impl WordTranslation {
    pub fn new(translation: impl Into<String>, part_of_speech: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
            part_of_speech: part_of_speech.into(),
        }
    }

    /// Result for a word with no known translation: the word in brackets.
    pub fn unknown(word: &str) -> Self {
        Self::new(format!("[{}]", word), UNKNOWN_PART_OF_SPEECH)
    }

    pub fn is_unknown(&self) -> bool {
        self.part_of_speech == UNKNOWN_PART_OF_SPEECH
    }
}

/// Translation of a whole sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceTranslation {
    pub translation: String,
}

impl SentenceTranslation {
    pub fn new(translation: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_trailing_period_and_lowercases() {
        assert_eq!(normalize_word("Kaffee."), "kaffee");
    }

    #[test]
    fn strips_punctuation_on_both_ends() {
        assert_eq!(normalize_word("  ¿Hallo!?  "), "¿hallo");
        assert_eq!(normalize_word(",bitte;"), "bitte");
        assert_eq!(normalize_word(". . Tag"), "tag");
    }

    #[test]
    fn keeps_inner_punctuation() {
        assert_eq!(normalize_word("z.B."), "z.b");
    }

    #[test]
    fn lowercases_umlauts() {
        assert_eq!(normalize_word("Möchten"), "möchten");
        assert_eq!(normalize_word("CAFÉ"), "café");
    }

    #[test]
    fn punctuation_only_normalizes_to_empty() {
        assert_eq!(normalize_word("?!"), "");
        assert_eq!(normalize_word("   "), "");
    }

    #[test]
    fn unknown_word_is_bracketed() {
        let result = WordTranslation::unknown("flugzeug");
        assert_eq!(result.translation, "[flugzeug]");
        assert!(result.is_unknown());
    }

    #[test]
    fn word_translation_serializes_camel_case() {
        let json = serde_json::to_value(WordTranslation::new("coffee", "noun")).unwrap();
        assert_eq!(json["partOfSpeech"], "noun");
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(word in "\\PC{0,20}") {
            let once = normalize_word(&word);
            prop_assert_eq!(normalize_word(&once), once);
        }

        #[test]
        fn normalized_word_has_no_edge_punctuation(word in "[a-zA-Z.,!?;: ]{0,20}") {
            let normalized = normalize_word(&word);
            prop_assert!(!normalized.starts_with(EDGE_PUNCTUATION));
            prop_assert!(!normalized.ends_with(EDGE_PUNCTUATION));
        }
    }
}
