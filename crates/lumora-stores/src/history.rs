// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user activity history (views, likes, favorites), paginated with
//! infinite-scroll semantics: page one replaces, later pages append.

use lumora_client::ApiClient;
use lumora_core::types::{ContentDto, VideoItem};
use lumora_core::{LumoraError, Page, PageResponse};
use strum::Display;

use crate::mapper::map_content_to_video_item;

/// Which activity feed to page through; doubles as the path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum HistoryKind {
    View,
    Like,
    Favorite,
}

/// Scrollable history list for one activity kind.
pub struct HistoryStore {
    client: ApiClient,
    kind: HistoryKind,
    items: Vec<VideoItem>,
    page: Page,
    loading: bool,
    error: Option<String>,
}

impl HistoryStore {
    pub fn new(client: ApiClient, kind: HistoryKind) -> Self {
        Self {
            client,
            kind,
            items: Vec::new(),
            page: Page::default(),
            loading: false,
            error: None,
        }
    }

    pub fn kind(&self) -> HistoryKind {
        self.kind
    }

    pub fn items(&self) -> &[VideoItem] {
        &self.items
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn has_more(&self) -> bool {
        self.page.has_next
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches one page. Page 1 replaces the list; any later page appends
    /// to it. A failure leaves whatever was already loaded in place.
    pub async fn fetch(&mut self, page: u32, page_size: u32) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;

        let query = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        let result = self
            .client
            .get_json::<PageResponse<ContentDto>>(&format!("/api/history/{}", self.kind), &query)
            .await;
        self.loading = false;

        match result {
            Ok(response) => {
                self.page = response.page();
                let mapped = response.list.iter().map(map_content_to_video_item);
                if page <= 1 {
                    self.items = mapped.collect();
                } else {
                    self.items.extend(mapped);
                }
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Convenience for infinite scroll: fetches the page after the
    /// current one, keeping the page size.
    pub async fn fetch_next(&mut self) -> Result<(), LumoraError> {
        let (next, size) = (self.page.page + 1, self.page.page_size);
        self.fetch(next, size).await
    }

    /// Drops the loaded items and resets the cursor. Local only.
    pub fn clear(&mut self) {
        self.items.clear();
        self.page = Page::default();
        self.error = None;
    }

    fn fail(&mut self, err: LumoraError) -> LumoraError {
        self.error = Some(err.user_message());
        err
    }
}
