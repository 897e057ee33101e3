//! HTTP adapters - REST API implementations.

pub mod practice;

pub use practice::{practice_router, PracticeAppState, RouterOptions};
