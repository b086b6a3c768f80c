//! Configuration management for hwprofile
//!
//! This module handles loading, validation, and management of configuration.
//! The classification tables that drive normalization and extraction live here
//! so a deployment can override them without code changes.

use crate::error::{HwProfileError, Result};
use crate::patterns::{ExtractorRules, NormalizerRules};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta", default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub normalizer: NormalizerRules,
    #[serde(default)]
    pub extractor: ExtractorRules,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            schema_version: "1.0.0".to_string(),
            created_at: current_timestamp(),
            last_modified: current_timestamp(),
        }
    }
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Output and batch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Run the type normalizer before extraction
    pub normalize_first: bool,
    /// Worker threads for batch runs (1 = sequential)
    pub parallelism: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            normalize_first: true,
            parallelism: 1,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HwProfileError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| HwProfileError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| HwProfileError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: HWPROFILE_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("HWPROFILE_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "OUTPUT__PRETTY" => {
                self.output.pretty = parse_env_bool(path, value)?;
            }
            "OUTPUT__NORMALIZE_FIRST" => {
                self.output.normalize_first = parse_env_bool(path, value)?;
            }
            "OUTPUT__PARALLELISM" => {
                self.output.parallelism =
                    value.parse().map_err(|_| HwProfileError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as an integer", value),
                    })?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            HwProfileError::Config("Cannot determine config directory".to_string())
        })?;

        Ok(config_dir.join("hwprofile").join("config.toml"))
    }
}

fn parse_env_bool(path: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| HwProfileError::InvalidConfigValue {
        path: path.to_string(),
        message: format!("Cannot parse '{}' as boolean", value),
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig::default(),
            normalizer: NormalizerRules::default(),
            extractor: ExtractorRules::default(),
            output: OutputConfig::default(),
        }
    }
}
