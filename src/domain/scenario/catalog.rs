//! Scenario catalog - the read-only list of practice scenarios.
//!
//! The catalog ships embedded as YAML; deployments can point
//! `LINGOFLOW__TUTOR__CATALOG_PATH` at their own file with the same shape.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::{Scenario, ScenarioCategory};

const DEFAULT_CATALOG_YAML: &str = include_str!("default_catalog.yaml");

static DEFAULT_CATALOG: Lazy<Result<ScenarioCatalog, CatalogError>> =
    Lazy::new(|| ScenarioCatalog::from_yaml(DEFAULT_CATALOG_YAML));

/// Errors raised while loading a catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Catalog contains no scenarios")]
    Empty,

    #[error("Scenario id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("Scenario '{0}' has a blank welcome message")]
    MissingWelcome(String),
}

/// Ordered, validated list of scenario categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioCatalog {
    categories: Vec<ScenarioCategory>,
}

impl ScenarioCatalog {
    /// Builds a catalog from categories, enforcing unique ids and non-blank
    /// welcome messages.
    pub fn new(categories: Vec<ScenarioCategory>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for scenario in categories.iter().flat_map(|c| c.scenarios.iter()) {
            if !seen.insert(scenario.id.as_str().to_string()) {
                return Err(CatalogError::DuplicateId(scenario.id.to_string()));
            }
            if scenario.welcome_message.trim().is_empty() {
                return Err(CatalogError::MissingWelcome(scenario.id.to_string()));
            }
        }
        if seen.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { categories })
    }

    /// Parses a catalog from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let categories: Vec<ScenarioCategory> =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(categories)
    }

    /// Loads a catalog from a YAML file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&yaml)
    }

    /// Returns the catalog shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        (*DEFAULT_CATALOG).clone()
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[ScenarioCategory] {
        &self.categories
    }

    /// Looks up a scenario by id.
    pub fn find(&self, id: &str) -> Option<&Scenario> {
        self.scenarios().find(|s| s.id.as_str() == id)
    }

    /// All scenarios in catalog order.
    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.categories.iter().flat_map(|c| c.scenarios.iter())
    }
}
