//! HTTP adapter for the practice API.
//!
//! Exposes scenario selection, the session lifecycle, vocabulary and
//! translation over JSON. Mounted at `/api`; see [`practice_routes`].

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::{status_for, PracticeApiError, PracticeAppState};
pub use routes::{practice_router, practice_routes, RouterOptions};
