//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - LLM providers (OpenAI, Anthropic, mock)
//! - `gateways` - Correction, summary and translation gateways
//! - `http` - Axum REST API
//! - `storage` - In-memory session registry

pub mod ai;
pub mod gateways;
pub mod http;
pub mod storage;
