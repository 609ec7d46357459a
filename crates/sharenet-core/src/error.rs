// Rust guideline compliant 2026-02-06

//! Error types for the ShareNet core library.

use thiserror::Error;

/// Result type alias for ShareNet core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ShareNet core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored record failed validation.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Record not found in its collection.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "Item".
        entity: &'static str,
        /// The identifier that did not resolve.
        id: String,
    },

    /// Status change not present in the transition table.
    #[error("Invalid {entity} status transition from {from} to {to}")]
    InvalidTransition {
        /// Entity kind whose status was being changed.
        entity: &'static str,
        /// Current status.
        from: String,
        /// Attempted target status.
        to: String,
    },

    /// The store lock could not be acquired in time.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
