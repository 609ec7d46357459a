// Rust guideline compliant 2026-02-09

//! Error handling for ShareNet application services.

use serde::Serialize;
use sharenet_core::Error as CoreError;
use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The referenced entity does not exist.
    NotFound,
    /// The actor lacks the required relationship to the entity.
    Forbidden,
    /// The operation is not permitted from the current status.
    InvalidState,
    /// A required field is missing or malformed.
    ValidationFailed,
    /// Duplicate request or claim, or a lost concurrent-mutation race.
    Conflict,
    /// IO failure while reading or writing the data directory.
    IoError,
    /// JSON serialization or parsing failed.
    JsonError,
    /// Configuration could not be loaded.
    ConfigError,
    /// The data directory has not been initialized.
    NotInitialized,
    /// Failure outside the marketplace, e.g. malformed command input.
    #[serde(rename = "internal_error")]
    Internal,
}

impl ErrorCode {
    /// Failure kind reported to callers.
    #[must_use]
    pub fn kind(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NotFound",
            ErrorCode::Forbidden => "Forbidden",
            ErrorCode::InvalidState => "InvalidState",
            ErrorCode::ValidationFailed => "ValidationFailed",
            ErrorCode::Conflict => "Conflict",
            ErrorCode::IoError
            | ErrorCode::JsonError
            | ErrorCode::ConfigError
            | ErrorCode::NotInitialized
            | ErrorCode::Internal => "Internal",
        }
    }
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Data directory is missing.
    #[error("ShareNet data directory not initialized at {path}. Run 'snet init' first.")]
    NotInitialized {
        /// Path where the data directory was expected.
        path: PathBuf,
    },

    /// Entity id does not resolve.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name.
        entity: &'static str,
        /// Requested identifier.
        id: String,
    },

    /// Actor is not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Operation not permitted from the current status.
    #[error("{message}")]
    InvalidState {
        /// Human-readable reason.
        message: String,
        /// Status the entity is in.
        current: String,
        /// Status or action that was attempted.
        attempted: String,
    },

    /// Missing or malformed input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Duplicate entity or lost race.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Builds an [`AppError::InvalidState`].
    pub fn invalid_state(
        message: impl Into<String>,
        current: impl Display,
        attempted: impl Display,
    ) -> Self {
        AppError::InvalidState {
            message: message.into(),
            current: current.to_string(),
            attempted: attempted.to_string(),
        }
    }

    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotInitialized { .. } => ErrorCode::NotInitialized,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Forbidden(_) => ErrorCode::Forbidden,
            AppError::InvalidState { .. } => ErrorCode::InvalidState,
            AppError::Validation(_) => ErrorCode::ValidationFailed,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => ErrorCode::NotFound,
                CoreError::InvalidTransition { .. } => ErrorCode::InvalidState,
                CoreError::InvalidRecord(_) => ErrorCode::ValidationFailed,
                CoreError::Conflict(_) => ErrorCode::Conflict,
                CoreError::Config(_) => ErrorCode::ConfigError,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::NotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::NotFound { entity, id } => Some(serde_json::json!({
                "entity": entity,
                "id": id,
            })),
            AppError::InvalidState {
                current, attempted, ..
            } => Some(serde_json::json!({
                "current": current,
                "attempted": attempted,
            })),
            AppError::Core(CoreError::NotFound { entity, id }) => Some(serde_json::json!({
                "entity": entity,
                "id": id,
            })),
            AppError::Core(CoreError::InvalidTransition { entity, from, to }) => {
                Some(serde_json::json!({
                    "entity": entity,
                    "current": from,
                    "attempted": to,
                }))
            }
            _ => None,
        }
    }
}
