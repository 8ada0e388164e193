// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Port traits implemented by pluggable backends.

pub mod credential;

pub use credential::{CredentialStore, PersistedCredential};
