// Rust guideline compliant 2026-02-06

//! Command implementations for the ShareNet CLI.
//!
//! Each group module turns parsed arguments into marketplace calls and wraps
//! the result in a [`Reply`].

pub mod claim;
pub mod init;
pub mod item;
pub mod post;
pub mod request;
pub mod trust;
pub mod txn;
pub mod wanted;

use crate::cli::{Cli, Commands, PageArgs};
use crate::output::Reply;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use sharenet_app::{AppError, Marketplace, PageRequest, RepoContext};
use std::path::Path;

/// An opened data directory plus the acting user.
pub struct Session {
    market: Marketplace,
    actor: Option<String>,
}

impl Session {
    /// Opens the marketplace in an initialized data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is not initialized or its
    /// configuration is invalid.
    pub fn open(data_dir: Option<&Path>, actor: Option<String>) -> Result<Self> {
        let market = RepoContext::discover(data_dir)?.marketplace()?;
        Ok(Self { market, actor })
    }

    /// The marketplace.
    pub fn market(&self) -> &Marketplace {
        &self.market
    }

    /// The acting user.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no user was given.
    pub fn actor(&self) -> Result<&str> {
        match self.actor.as_deref().map(str::trim) {
            Some(actor) if !actor.is_empty() => Ok(actor),
            _ => Err(AppError::Validation(
                "an acting user is required; pass --as USER or set SHARENET_USER".to_string(),
            )
            .into()),
        }
    }
}

/// Runs the parsed command.
///
/// # Errors
///
/// Returns the failure of the underlying operation.
pub fn execute(cli: &Cli) -> Result<Reply> {
    let data_dir = cli.data_dir.as_deref();
    if let Commands::Init = cli.command {
        return init::execute(data_dir);
    }

    let session = Session::open(data_dir, cli.as_user.clone())?;
    match &cli.command {
        Commands::Init => init::execute(data_dir),
        Commands::Item { action } => item::execute(&session, action),
        Commands::Request { action } => request::execute(&session, action),
        Commands::Txn { action } => txn::execute(&session, action),
        Commands::Post { action } => post::execute(&session, action),
        Commands::Claim { action } => claim::execute(&session, action),
        Commands::Wanted { action } => wanted::execute(&session, action),
        Commands::Trust { user } => trust::execute(&session, user.as_deref()),
    }
}

pub(crate) fn page_request(args: PageArgs) -> PageRequest {
    PageRequest {
        page: args.page,
        limit: args.limit,
    }
}

/// Parses unix seconds, RFC 3339, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD` (UTC).
pub(crate) fn parse_time(value: &str) -> Result<i64, AppError> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<i64>() {
        return Ok(seconds);
    }
    if let Ok(at) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(at.timestamp());
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(at.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc().timestamp())
        .ok_or_else(|| AppError::Validation(format!("invalid time '{}'", value)))
}
