// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unread-notification badge counter.
//!
//! The badge must never crash a page, so the refresh swallows every
//! failure: transport errors, a missing envelope payload, or a negative
//! count all leave the last known value in place.

use lumora_client::{ApiClient, ApiEnvelope};
use lumora_core::LumoraError;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
struct UnreadCount {
    count: i64,
}

/// Badge counter store.
pub struct NotificationStore {
    client: ApiClient,
    unread: u64,
}

impl NotificationStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, unread: 0 }
    }

    pub fn unread(&self) -> u64 {
        self.unread
    }

    /// Refreshes the badge and returns the (possibly stale) count. Never
    /// fails; a bad response keeps the previous value.
    pub async fn fetch_unread_count(&mut self) -> u64 {
        let result: Result<ApiEnvelope<UnreadCount>, LumoraError> = self
            .client
            .get_json("/api/notifications/unread-count", &[])
            .await;

        match result {
            Ok(envelope) => match envelope.data {
                Some(payload) if payload.count >= 0 => {
                    self.unread = payload.count as u64;
                }
                Some(payload) => {
                    warn!(count = payload.count, "negative unread count ignored");
                }
                None => warn!("unread count response had no payload"),
            },
            Err(err) => warn!(error = %err, "unread count refresh failed"),
        }
        self.unread
    }

    /// Overwrites the badge locally, e.g. after a mark-all-read action.
    /// Negative values clamp to zero.
    pub fn set_unread_total(&mut self, count: i64) {
        self.unread = count.max(0) as u64;
    }
}
