// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential store implementations.
//!
//! `FileCredentialStore` is the multi-session scope (survives restarts);
//! `MemoryCredentialStore` is the page-lifetime scope. Which one a process
//! gets is decided by `session.scope` in the config, not by the stores.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lumora_config::{SessionConfig, StorageScope};
use lumora_core::{CredentialStore, LumoraError, PersistedCredential};
use tracing::{debug, warn};

/// Builds the credential store selected by config.
pub fn credential_store_from_config(config: &SessionConfig) -> Arc<dyn CredentialStore> {
    match config.scope {
        StorageScope::Persistent => {
            let path = config
                .credential_path
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(default_credential_path);
            Arc::new(FileCredentialStore::new(path))
        }
        StorageScope::Ephemeral => Arc::new(MemoryCredentialStore::default()),
    }
}

fn default_credential_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lumora/credential.json")
}

/// File-backed credential store (JSON document at a fixed path).
///
/// Two processes sharing the same path race last-write-wins; no
/// coordination is attempted.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<PersistedCredential>, LumoraError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LumoraError::Storage {
                    source: Box::new(e),
                });
            }
        };

        match serde_json::from_slice::<PersistedCredential>(&bytes) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                // Corrupt persisted state is discarded, never propagated.
                warn!(path = %self.path.display(), error = %e, "discarding corrupt credential");
                let _ = tokio::fs::remove_file(&self.path).await;
                Ok(None)
            }
        }
    }

    async fn save(&self, credential: &PersistedCredential) -> Result<(), LumoraError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LumoraError::Storage {
                    source: Box::new(e),
                })?;
        }
        let json = serde_json::to_vec_pretty(credential).map_err(|e| LumoraError::Storage {
            source: Box::new(e),
        })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| LumoraError::Storage {
                source: Box::new(e),
            })?;
        debug!(path = %self.path.display(), "credential persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), LumoraError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LumoraError::Storage {
                source: Box::new(e),
            }),
        }
    }
}

/// In-memory credential store; gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<PersistedCredential>>,
}

impl MemoryCredentialStore {
    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<PersistedCredential>>, LumoraError> {
        self.slot
            .lock()
            .map_err(|_| LumoraError::Internal("credential slot poisoned".into()))
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<PersistedCredential>, LumoraError> {
        Ok(self.slot()?.clone())
    }

    async fn save(&self, credential: &PersistedCredential) -> Result<(), LumoraError> {
        *self.slot()? = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), LumoraError> {
        *self.slot()? = None;
        Ok(())
    }
}
