// Rust guideline compliant 2026-02-09

//! Data directory discovery and path management utilities.

use crate::error::{AppError, Result};
use crate::marketplace::Marketplace;
use sharenet_core::{Config, JsonlNotifier, Store};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default data directory name, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".sharenet";

/// Path metadata for a ShareNet data directory.
#[derive(Debug, Clone)]
pub struct RepoContext {
    data_dir: PathBuf,
    config_path: PathBuf,
    outbox_path: PathBuf,
}

impl RepoContext {
    fn at(data_dir: PathBuf) -> Self {
        Self {
            config_path: data_dir.join("config.toml"),
            outbox_path: data_dir.join("notifications.jsonl"),
            data_dir,
        }
    }

    /// Locates an initialized data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Explicit directory, or `./.sharenet` when absent
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The working directory cannot be resolved
    /// - The data directory is missing
    pub fn discover(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?.join(DEFAULT_DATA_DIR),
        };
        if !data_dir.exists() {
            return Err(AppError::NotInitialized { path: data_dir });
        }
        Ok(Self::at(data_dir))
    }

    /// Creates a data directory with a default configuration.
    ///
    /// An existing configuration file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or configuration cannot be written.
    pub fn init(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let context = Self::at(data_dir.to_path_buf());
        if !context.config_path.exists() {
            Config::default().save(data_dir)?;
        }
        Ok(context)
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        self.config_path.as_path()
    }

    /// Returns the notification outbox path.
    #[must_use]
    pub fn outbox_path(&self) -> &Path {
        self.outbox_path.as_path()
    }

    /// Loads the data directory configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.data_dir())?)
    }

    /// Opens the store with the configured lock timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn open_store(&self, config: &Config) -> Result<Store> {
        Ok(Store::open(self.data_dir.clone())?
            .with_lock_timeout(config.lock_timeout_ms.map(Duration::from_millis)))
    }

    /// Builds a marketplace that writes notifications to the outbox file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or store cannot be opened.
    pub fn marketplace(&self) -> Result<Marketplace> {
        let config = self.load_config()?;
        let store = self.open_store(&config)?;
        Ok(Marketplace::new(store, config)
            .with_notifier(Arc::new(JsonlNotifier::new(self.outbox_path.clone()))))
    }
}
