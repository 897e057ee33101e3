//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `scenario` - Catalog of practice scenarios
//! - `practice` - Practice session aggregate and its values
//! - `translation` - Word and sentence translation values

pub mod foundation;
pub mod practice;
pub mod scenario;
pub mod translation;
