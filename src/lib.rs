//! Lingoflow - German conversation practice tutor
//!
//! Learners pick a role-play scenario, chat in German, and get every
//! utterance corrected by an LLM tutor. Words can be looked up and saved
//! along the way, and ending a session produces a structured recap.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
