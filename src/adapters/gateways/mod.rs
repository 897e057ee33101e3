//! Tutor gateway adapters.
//!
//! - `LlmCorrectionGateway` - grammar correction via an AI provider
//! - `LlmSummaryGateway` - session recap via an AI provider
//! - `LlmTranslationGateway` - word and sentence translation via an AI provider
//! - `DictionaryWordTranslator` - offline word lookup

mod dictionary_translator;
mod llm_correction_gateway;
mod llm_summary_gateway;
mod llm_translation_gateway;
mod structured_output;

pub use dictionary_translator::DictionaryWordTranslator;
pub use llm_correction_gateway::LlmCorrectionGateway;
pub use llm_summary_gateway::LlmSummaryGateway;
pub use llm_translation_gateway::LlmTranslationGateway;
