// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response envelope shapes.
//!
//! Most endpoints return their payload directly; a few (notifications)
//! wrap it in `{code, message, data}`. Failure bodies carry
//! `{message, data: {field: message}}` and are flattened into one
//! displayable string.

use std::collections::BTreeMap;

use serde::Deserialize;

/// `{code, message, data}` wrapper used by a handful of endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Body of a failed mutating request.
///
/// `data`, when present, maps field names to per-field validation messages.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<BTreeMap<String, String>>,
}

impl ApiFailure {
    /// Concatenates the top-level message with per-field messages for
    /// display, and returns the structured field errors alongside.
    pub fn normalized(&self) -> (String, Vec<(String, String)>) {
        let field_errors: Vec<(String, String)> = self
            .data
            .iter()
            .flat_map(|m| m.iter())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut message = self.message.clone().unwrap_or_default();
        for (field, detail) in &field_errors {
            if !message.is_empty() {
                message.push_str("; ");
            }
            message.push_str(field);
            message.push_str(": ");
            message.push_str(detail);
        }
        if message.is_empty() {
            message = "unknown error".into();
        }
        (message, field_errors)
    }
}
