// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lumora client SDK.
//!
//! This crate provides the error type, wire DTOs, view models, the
//! pagination cursor, and the port traits used throughout the Lumora
//! workspace. Stores and the HTTP client build on these.

pub mod error;
pub mod page;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LumoraError;
pub use page::{Page, PageResponse};
pub use traits::{CredentialStore, PersistedCredential};
pub use types::{
    CommentId, CommentNode, ContentId, ContentStatus, ContentType, TagId, UserId, UserRole,
    UserStatus,
};
