//! Offline word lookup over a small built-in dictionary.
//!
//! Covers the words of the café welcome line and the most common first
//! replies. Anything else resolves to the bracketed unknown form.

use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::translation::WordTranslation;
use crate::ports::{GatewayError, WordTranslator};

static DICTIONARY: Lazy<HashMap<&'static str, (&'static str, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        ("hallo", ("hello", "interjection")),
        ("willkommen", ("welcome", "adjective")),
        ("im", ("in the", "preposition")),
        ("café", ("café", "noun")),
        ("was", ("what", "pronoun")),
        ("möchten", ("would like", "verb")),
        ("sie", ("you", "pronoun")),
        ("bestellen", ("to order", "verb")),
        ("ich", ("I", "pronoun")),
        ("kaffee", ("coffee", "noun")),
        ("bitte", ("please", "adverb")),
        ("einen", ("a/an", "article")),
        ("guten", ("good", "adjective")),
        ("tag", ("day", "noun")),
    ])
});

/// Word translator backed by the built-in dictionary; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryWordTranslator;

impl DictionaryWordTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Looks up an already normalized word.
    pub fn lookup(word: &str) -> WordTranslation {
        match DICTIONARY.get(word) {
            Some((translation, pos)) => WordTranslation::new(*translation, *pos),
            None => WordTranslation::unknown(word),
        }
    }
}

#[async_trait]
impl WordTranslator for DictionaryWordTranslator {
    async fn translate_word(&self, word: &str) -> Result<WordTranslation, GatewayError> {
        Ok(Self::lookup(word))
    }
}
