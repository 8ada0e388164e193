// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content moderation queue.
//!
//! Holds the pending list; a review decision removes the item locally and
//! recomputes the cursor instead of refetching, stepping back a page only
//! when the current page empties. Status transitions are requested here
//! but owned by the server.

use lumora_client::ApiClient;
use lumora_core::types::{ContentDto, ContentId, ContentStatus, ContentType, TagRef};
use lumora_core::{LumoraError, Page, PageResponse};
use tracing::debug;

use crate::mapper::format_timestamp;

/// A review verdict; `PENDING` is not a requestable transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    fn status(self) -> ContentStatus {
        match self {
            ReviewDecision::Approve => ContentStatus::Approved,
            ReviewDecision::Reject => ContentStatus::Rejected,
        }
    }
}

/// Filters for the pending queue.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub keyword: Option<String>,
    pub content_type: Option<ContentType>,
}

/// One row of the moderation queue, timestamps already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingItem {
    pub content_id: ContentId,
    pub title: String,
    pub author: String,
    pub kind: ContentType,
    pub status: ContentStatus,
    pub description: String,
    pub created_time: String,
    pub last_modified_time: String,
    pub review_notes: Option<String>,
    pub tags: Vec<TagRef>,
}

impl PendingItem {
    fn from_dto(dto: &ContentDto) -> Self {
        Self {
            content_id: dto.content_id,
            title: dto.title.clone(),
            author: dto.author.clone().unwrap_or_default(),
            kind: dto.kind,
            status: dto.status,
            description: dto.description.clone().unwrap_or_default(),
            created_time: format_timestamp(&dto.created_time),
            last_modified_time: dto
                .last_modified_time
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
            review_notes: dto.review_notes.clone(),
            tags: dto.tags.clone(),
        }
    }
}

/// Paginated store over the pending-content queue.
pub struct ContentAuditStore {
    client: ApiClient,
    pending: Vec<PendingItem>,
    page: Page,
    query: AuditQuery,
    loading: bool,
    error: Option<String>,
}

impl ContentAuditStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            pending: Vec::new(),
            page: Page::default(),
            query: AuditQuery::default(),
            loading: false,
            error: None,
        }
    }

    pub fn pending(&self) -> &[PendingItem] {
        &self.pending
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_query(&mut self, query: AuditQuery) {
        self.query = query;
    }

    pub fn set_pagination(&mut self, page: u32, page_size: u32) {
        self.page.page = page;
        self.page.page_size = page_size;
    }

    /// Fetches the current page of pending content with the active
    /// filters. Stale-but-present on failure.
    pub async fn fetch_pending(&mut self) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;

        let mut query = vec![
            ("page", self.page.page.to_string()),
            ("pageSize", self.page.page_size.to_string()),
        ];
        if let Some(keyword) = &self.query.keyword {
            query.push(("keyword", keyword.clone()));
        }
        if let Some(kind) = self.query.content_type {
            query.push(("type", kind.to_string()));
        }

        let result = self
            .client
            .get_json::<PageResponse<ContentDto>>("/api/admin/contents/pending", &query)
            .await;
        self.loading = false;

        match result {
            Ok(response) => {
                self.page = response.page();
                self.pending = response.list.iter().map(PendingItem::from_dto).collect();
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Requests a status transition for one item and drops it from the
    /// local queue.
    pub async fn review(
        &mut self,
        content_id: ContentId,
        decision: ReviewDecision,
        notes: Option<&str>,
    ) -> Result<(), LumoraError> {
        let body = serde_json::json!({
            "status": decision.status(),
            "reviewNotes": notes,
        });
        self.client
            .post_unit(&format!("/api/admin/contents/{}/review", content_id.0), &body)
            .await
            .map_err(|e| self.fail(e))?;

        self.remove_local(&[content_id]).await
    }

    /// Applies one verdict to several items. An empty id list is a local
    /// no-op.
    pub async fn batch_review(
        &mut self,
        content_ids: &[ContentId],
        decision: ReviewDecision,
        notes: Option<&str>,
    ) -> Result<(), LumoraError> {
        if content_ids.is_empty() {
            return Ok(());
        }
        let body = serde_json::json!({
            "contentIds": content_ids,
            "status": decision.status(),
            "reviewNotes": notes,
        });
        self.client
            .post_unit("/api/admin/contents/batch-review", &body)
            .await
            .map_err(|e| self.fail(e))?;

        self.remove_local(content_ids).await
    }

    async fn remove_local(&mut self, content_ids: &[ContentId]) -> Result<(), LumoraError> {
        let before = self.pending.len();
        self.pending.retain(|item| !content_ids.contains(&item.content_id));
        let removed = (before - self.pending.len()) as u64;
        self.page.remove(removed);
        debug!(removed, total = self.page.total, "pending items reviewed");

        if self.pending.is_empty() && self.page.page > 1 {
            self.page.page -= 1;
            self.fetch_pending().await?;
        }
        Ok(())
    }

    fn fail(&mut self, err: LumoraError) -> LumoraError {
        self.error = Some(err.user_message());
        err
    }
}
