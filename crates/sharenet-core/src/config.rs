// Rust guideline compliant 2026-02-06

//! Configuration management for ShareNet.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Signed trust score adjustments per outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustDeltas {
    /// Returned on time.
    #[serde(default = "default_on_time_return")]
    pub on_time_return: i32,
    /// Transaction completed.
    #[serde(default = "default_completed")]
    pub completed: i32,
    /// Returned within the minor lateness band.
    #[serde(default = "default_late_return_minor")]
    pub late_return_minor: i32,
    /// Returned past the minor lateness band.
    #[serde(default = "default_late_return_major")]
    pub late_return_major: i32,
    /// Raised a dispute.
    #[serde(default = "default_dispute")]
    pub dispute: i32,
}

fn default_on_time_return() -> i32 {
    5
}

fn default_completed() -> i32 {
    2
}

fn default_late_return_minor() -> i32 {
    -3
}

fn default_late_return_major() -> i32 {
    -10
}

fn default_dispute() -> i32 {
    -5
}

impl Default for TrustDeltas {
    fn default() -> Self {
        Self {
            on_time_return: default_on_time_return(),
            completed: default_completed(),
            late_return_minor: default_late_return_minor(),
            late_return_major: default_late_return_major(),
            dispute: default_dispute(),
        }
    }
}

/// Configuration for ShareNet behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Trust score for users without a profile (0-100).
    #[serde(default = "default_trust_score")]
    pub default_trust_score: u8,

    /// Last day late that still counts as a minor late return.
    #[serde(default = "default_minor_late_days")]
    pub minor_late_days: i64,

    /// Default page size for listings.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum wait for the store lock; blocks indefinitely when unset.
    #[serde(default)]
    pub lock_timeout_ms: Option<u64>,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Trust score deltas.
    #[serde(default)]
    pub trust: TrustDeltas,
}

fn default_trust_score() -> u8 {
    crate::trust::DEFAULT_SCORE
}

fn default_minor_late_days() -> i64 {
    3
}

fn default_page_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_trust_score: default_trust_score(),
            minor_late_days: default_minor_late_days(),
            page_size: default_page_size(),
            lock_timeout_ms: None,
            output_format: OutputFormat::default(),
            trust: TrustDeltas::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<data_dir>/config.toml`
    /// 3. Environment variables with `SHARENET_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_with_env(data_dir, |key| std::env::var(key).ok())
    }

    /// Loads configuration using a custom environment lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_with_env<F>(data_dir: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let config_path = data_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SHARENET_DEFAULT_TRUST_SCORE` - Default trust score (0-100)
    /// - `SHARENET_MINOR_LATE_DAYS` - Minor lateness band in days
    /// - `SHARENET_PAGE_SIZE` - Default listing page size
    /// - `SHARENET_LOCK_TIMEOUT_MS` - Store lock wait in milliseconds
    /// - `SHARENET_OUTPUT_FORMAT` - Output format (json/table/plain)
    fn apply_env_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env("SHARENET_DEFAULT_TRUST_SCORE") {
            self.default_trust_score = val.parse().map_err(|_| {
                Error::Config("SHARENET_DEFAULT_TRUST_SCORE must be a number 0-100".to_string())
            })?;
        }

        if let Some(val) = env("SHARENET_MINOR_LATE_DAYS") {
            self.minor_late_days = val.parse().map_err(|_| {
                Error::Config("SHARENET_MINOR_LATE_DAYS must be a number".to_string())
            })?;
        }

        if let Some(val) = env("SHARENET_PAGE_SIZE") {
            self.page_size = val.parse().map_err(|_| {
                Error::Config("SHARENET_PAGE_SIZE must be a positive number".to_string())
            })?;
        }

        if let Some(val) = env("SHARENET_LOCK_TIMEOUT_MS") {
            self.lock_timeout_ms = Some(val.parse().map_err(|_| {
                Error::Config("SHARENET_LOCK_TIMEOUT_MS must be a number".to_string())
            })?);
        }

        if let Some(val) = env("SHARENET_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(Error::Config(
                        "SHARENET_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - default_trust_score is above 100
    /// - minor_late_days is negative
    /// - page_size is zero
    fn validate(&self) -> Result<()> {
        if self.default_trust_score > crate::trust::MAX_SCORE {
            return Err(Error::Config(format!(
                "default_trust_score must be 0-100, got {}",
                self.default_trust_score
            )));
        }

        if self.minor_late_days < 0 {
            return Err(Error::Config(
                "minor_late_days cannot be negative".to_string(),
            ));
        }

        if self.page_size == 0 {
            return Err(Error::Config(
                "page_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to `<data_dir>/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or written.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(data_dir.join("config.toml"), content)?;
        Ok(())
    }
}
