//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `AIProvider` - Completion requests against an LLM vendor
//!
//! ## Tutor Gateways
//!
//! - `CorrectionGateway` - Grammar correction of a learner utterance
//! - `SummaryGateway` - End-of-session recap
//! - `WordTranslator` / `SentenceTranslator` - Translation lookups
//!
//! ## Session Ports
//!
//! - `SessionRegistry` - Owned contexts of live practice sessions

mod ai_provider;
mod correction_gateway;
mod gateway_error;
mod session_registry;
mod summary_gateway;
mod translation_gateway;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use correction_gateway::{CorrectionGateway, CorrectionInput};
pub use gateway_error::GatewayError;
pub use session_registry::{RegistryError, SessionRegistry, SharedSession};
pub use summary_gateway::{SummaryGateway, SummaryInput};
pub use translation_gateway::{SentenceTranslator, WordTranslator};
