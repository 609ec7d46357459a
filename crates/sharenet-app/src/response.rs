// Rust guideline compliant 2026-02-09

//! Response envelopes handed to the request layer.
//!
//! A caller gets either the updated entities inside a [`SuccessEnvelope`] or
//! the failure kind plus a readable reason inside an [`ErrorEnvelope`].

use crate::error::{AppError, ErrorCode};
use serde::Serialize;

const SERIALIZE_FAILED: &str =
    r#"{"status":"error","code":"internal_error","kind":"Internal","message":"Failed to serialize response"}"#;

/// Updated entities returned by a successful operation.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// Always `ok`.
    pub status: &'static str,
    /// Operation result.
    pub result: T,
}

impl<T: Serialize> SuccessEnvelope<T> {
    /// Wraps an operation result.
    #[must_use]
    pub fn new(result: T) -> Self {
        Self { status: "ok", result }
    }

    /// Pretty-printed JSON, or a serialization error envelope.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| SERIALIZE_FAILED.to_string())
    }
}

/// Failure kind, stable code and reason for a rejected operation.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `error`.
    pub status: &'static str,
    /// Stable machine-readable code.
    pub code: ErrorCode,
    /// Failure kind: NotFound, Forbidden, InvalidState, ValidationFailed,
    /// Conflict or Internal.
    pub kind: &'static str,
    /// Human-readable reason.
    pub message: String,
    /// Structured context such as current and attempted status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Describes an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        let code = error.code();
        Self {
            status: "error",
            code,
            kind: code.kind(),
            message: error.to_string(),
            details: error.details(),
        }
    }

    /// Describes a failure raised outside the marketplace, e.g. bad CLI input.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            code: ErrorCode::Internal,
            kind: ErrorCode::Internal.kind(),
            message: message.into(),
            details: None,
        }
    }

    /// Pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| SERIALIZE_FAILED.to_string())
    }
}
