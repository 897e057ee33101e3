//! Scenario value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ScenarioId;

/// CEFR band a scenario is pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioLevel {
    #[serde(rename = "A1-A2")]
    A1A2,
    #[serde(rename = "A2-B1")]
    A2B1,
}

impl fmt::Display for ScenarioLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScenarioLevel::A1A2 => "A1-A2",
            ScenarioLevel::A2B1 => "A2-B1",
        };
        write!(f, "{}", s)
    }
}

/// A role-play situation the learner can practice.
///
/// Immutable once loaded; sessions hold a copy and never change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: ScenarioId,
    pub title: String,
    pub description: String,
    /// First assistant line of every session in this scenario.
    pub welcome_message: String,
    pub level: ScenarioLevel,
}

/// A named group of scenarios (e.g. "Travel", "Office").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioCategory {
    pub category: String,
    pub scenarios: Vec<Scenario>,
}

#[cfg(test)]
pub(crate) fn cafe() -> Scenario {
    Scenario {
        id: ScenarioId::new("cafe").unwrap(),
        title: "Café".to_string(),
        description: "Practice ordering coffee and pastries.".to_string(),
        welcome_message: "Hallo! Willkommen im Café. Was möchten Sie bestellen?".to_string(),
        level: ScenarioLevel::A1A2,
    }
}
