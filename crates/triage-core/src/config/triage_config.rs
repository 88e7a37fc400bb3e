//! Top-level Triage configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::StorageConfig;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TRIAGE_*`)
/// 2. Project config (`triage.toml` in project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TriageConfig {
    pub storage: StorageConfig,
}

impl TriageConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 2: project config
        let project_config_path = root.join("triage.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(
                path = %project_config_path.display(),
                "loaded project config"
            );
        }

        // Layer 1 (highest priority): environment variables
        Self::apply_env_overrides(&mut config);

        // Validate the final config
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &TriageConfig) -> Result<(), ConfigError> {
        if let Some(size) = config.storage.read_pool_size {
            if size == 0 || size > 8 {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: "must be between 1 and 8".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolve the database file path against the project root.
    pub fn database_path(&self, root: &Path) -> PathBuf {
        self.storage
            .db_path
            .clone()
            .unwrap_or_else(|| root.join("triage.db"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut TriageConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: TriageConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut TriageConfig, other: &TriageConfig) {
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TRIAGE_DB_PATH`, `TRIAGE_READ_POOL_SIZE`.
    fn apply_env_overrides(config: &mut TriageConfig) {
        if let Ok(val) = std::env::var("TRIAGE_DB_PATH") {
            config.storage.db_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("TRIAGE_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
