// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lumora client SDK.

use thiserror::Error;

/// The primary error type used across all Lumora stores and the HTTP client.
#[derive(Debug, Error)]
pub enum LumoraError {
    /// Network or transport failure before a response was received.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend rejected the credential (HTTP 401). Triggers forced
    /// session teardown at the client boundary.
    #[error("authentication expired")]
    Unauthorized,

    /// Structured validation failure (4xx with field errors). The message
    /// already concatenates the top-level message with per-field messages.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        field_errors: Vec<(String, String)>,
    },

    /// Any other non-success response from the backend.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Credential persistence errors (file I/O, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LumoraError {
    /// Human-readable message suitable for a store's `error` field.
    ///
    /// Stores write this into their local state before propagating the
    /// error, so the view layer always has something displayable even when
    /// the caller swallows the `Err`.
    pub fn user_message(&self) -> String {
        match self {
            LumoraError::Unauthorized => "authentication expired, please sign in again".into(),
            LumoraError::Validation { message, .. } => message.clone(),
            LumoraError::Api { message, .. } => message.clone(),
            LumoraError::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_message() {
        let err = LumoraError::Api {
            status: 409,
            message: "tag already exists".into(),
        };
        assert_eq!(err.user_message(), "tag already exists");
    }

    #[test]
    fn unauthorized_has_fixed_message() {
        assert_eq!(
            LumoraError::Unauthorized.user_message(),
            "authentication expired, please sign in again"
        );
    }

    #[test]
    fn validation_carries_field_errors() {
        let err = LumoraError::Validation {
            message: "invalid input; username: too short".into(),
            field_errors: vec![("username".into(), "too short".into())],
        };
        assert!(err.user_message().contains("username"));
    }
}
