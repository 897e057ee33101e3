//! Storage adapters.

mod idle_session_sweeper;
mod in_memory_session_registry;

pub use idle_session_sweeper::{IdleSessionSweeper, IdleSessionSweeperConfig};
pub use in_memory_session_registry::InMemorySessionRegistry;
