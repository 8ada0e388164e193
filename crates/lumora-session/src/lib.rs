// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session management for the Lumora SDK.
//!
//! [`SessionStore`] drives login, registration, logout, password change,
//! profile updates, and avatar upload, and exposes the authentication /
//! role predicates. The credential is persisted through the
//! [`lumora_core::CredentialStore`] port; see [`persist`] for the
//! file-backed and in-memory implementations.

pub mod persist;
pub mod store;

pub use persist::{FileCredentialStore, MemoryCredentialStore, credential_store_from_config};
pub use store::{LoginRequest, ProfileUpdate, RegisterRequest, SessionStore, TeardownHook};
