// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared bearer-token slot.
//!
//! The session store writes the token here; the HTTP client reads it on
//! every request. Cloning a [`TokenSlot`] yields a handle to the same
//! slot, which is how the two sides stay in sync without a global.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;

/// Process-wide bearer credential slot.
#[derive(Clone, Default)]
pub struct TokenSlot(Arc<ArcSwapOption<SecretString>>);

impl TokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new token, replacing any previous one.
    pub fn set(&self, token: SecretString) {
        self.0.store(Some(Arc::new(token)));
    }

    /// Removes the token. Subsequent requests go out unauthenticated.
    pub fn clear(&self) {
        self.0.store(None);
    }

    /// Current token, if any.
    pub fn get(&self) -> Option<Arc<SecretString>> {
        self.0.load_full()
    }

    pub fn is_set(&self) -> bool {
        self.0.load().is_some()
    }
}

impl std::fmt::Debug for TokenSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSlot")
            .field("set", &self.is_set())
            .finish()
    }
}
