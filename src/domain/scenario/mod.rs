//! Scenario module - the static catalog of practice situations.

mod catalog;
mod scenario;

pub use catalog::{CatalogError, ScenarioCatalog};
pub use scenario::{Scenario, ScenarioCategory, ScenarioLevel};

#[cfg(test)]
pub(crate) use scenario::cafe as test_scenario;
