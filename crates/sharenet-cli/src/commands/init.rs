// Rust guideline compliant 2026-02-06

//! Implementation of the `snet init` command.

use crate::output::{Detail, Reply};
use anyhow::Result;
use serde::Serialize;
use sharenet_app::repo::DEFAULT_DATA_DIR;
use sharenet_app::RepoContext;
use std::path::{Path, PathBuf};

/// Paths of an initialized data directory.
#[derive(Debug, Serialize)]
pub struct InitReport {
    /// Data directory.
    pub data_dir: PathBuf,
    /// Configuration file.
    pub config: PathBuf,
}

impl Detail for InitReport {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Data directory", self.data_dir.display().to_string()),
            ("Config", self.config.display().to_string()),
        ]
    }
}

/// Creates the data directory and its default configuration.
///
/// Running it again keeps the existing configuration and data.
///
/// # Errors
///
/// Returns an error if the directory or configuration cannot be written.
pub fn execute(data_dir: Option<&Path>) -> Result<Reply> {
    let data_dir = data_dir.map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), Path::to_path_buf);
    let context = RepoContext::init(&data_dir)?;
    tracing::info!(data_dir = %context.data_dir().display(), "initialized");
    Reply::record(&InitReport {
        data_dir: context.data_dir().to_path_buf(),
        config: context.config_path().to_path_buf(),
    })
}
