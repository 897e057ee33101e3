//! Tutor behavior configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::ValidationError;

const MAX_REPLY_DELAY_MS: u64 = 10_000;

/// Tutor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TutorConfig {
    /// Pause between a successful correction and the tutor reply, in milliseconds
    #[serde(default = "default_reply_delay")]
    pub reply_delay_ms: u64,

    /// Backend for single-word lookups
    #[serde(default)]
    pub word_lookup: WordLookup,

    /// YAML file replacing the built-in scenario catalog
    pub catalog_path: Option<PathBuf>,

    /// Unused sessions are evicted after this many seconds
    #[serde(default = "default_session_idle_ttl")]
    pub session_idle_ttl_secs: u64,
}

/// Word lookup backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WordLookup {
    /// Ask the configured AI provider
    #[default]
    Llm,
    /// Built-in offline dictionary
    Dictionary,
}

impl TutorConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_ttl_secs)
    }

    /// Validate tutor configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(ValidationError::ReplyDelayTooLong);
        }
        if self.session_idle_ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionIdleTtl);
        }
        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(ValidationError::CatalogNotFound(
                    path.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay(),
            word_lookup: WordLookup::default(),
            catalog_path: None,
            session_idle_ttl_secs: default_session_idle_ttl(),
        }
    }
}

fn default_reply_delay() -> u64 {
    500
}

fn default_session_idle_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutor_defaults() {
        let config = TutorConfig::default();
        assert_eq!(config.reply_delay(), Duration::from_millis(500));
        assert_eq!(config.word_lookup, WordLookup::Llm);
        assert!(config.catalog_path().is_none());
        assert_eq!(config.session_idle_ttl(), Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_idle_ttl_rejected() {
        let config = TutorConfig {
            session_idle_ttl_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSessionIdleTtl)
        ));
    }

    #[test]
    fn test_reply_delay_limit() {
        let config = TutorConfig {
            reply_delay_ms: 60_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ReplyDelayTooLong)
        ));
    }

    #[test]
    fn test_missing_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = TutorConfig {
            catalog_path: Some(dir.path().join("missing.yaml")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::CatalogNotFound(_))
        ));
    }

    #[test]
    fn test_existing_catalog_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = TutorConfig {
            catalog_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
