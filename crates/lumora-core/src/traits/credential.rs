// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence port for the session credential.
//!
//! The session store never touches storage directly; it goes through this
//! port, so the storage scope (multi-session file vs page-lifetime memory)
//! is a construction-time choice.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LumoraError;
use crate::types::SessionUser;

/// Credential and profile as persisted between sessions.
///
/// Serialized as one JSON document with the same two keys the backend's
/// web client uses (`token`, `userInfo`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedCredential {
    pub token: String,
    #[serde(rename = "userInfo")]
    pub user: SessionUser,
}

/// Port for loading, saving, and clearing the persisted credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the persisted credential, if any.
    ///
    /// A corrupt or unreadable credential is reported as `Ok(None)` after
    /// clearing it; restore must never fail the session store's
    /// construction.
    async fn load(&self) -> Result<Option<PersistedCredential>, LumoraError>;

    /// Persists the credential, replacing any previous one.
    async fn save(&self, credential: &PersistedCredential) -> Result<(), LumoraError>;

    /// Removes the persisted credential.
    async fn clear(&self) -> Result<(), LumoraError>;
}
