//! Saved vocabulary - insertion-ordered set of words.

use serde::{Deserialize, Serialize};

/// Words the learner saved during a session.
///
/// Entries are unique and compared case-sensitively, exactly as saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyList {
    words: Vec<String>,
}

impl VocabularyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word; returns false if it was already present.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.contains(&word) {
            return false;
        }
        self.words.push(word);
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}
