// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content browsing state: the visible video list, the currently open
//! detail item, search results, the recommendation feed, and the
//! like/favorite toggles.
//!
//! The two toggles deliberately differ. Likes wait for the server and
//! apply its counts; favorites flip immediately and reconcile with the
//! response, keeping the flipped state if the request fails.

use std::collections::HashSet;

use lumora_client::ApiClient;
use lumora_core::types::{
    ContentDto, ContentId, ContentStatus, ContentType, FavoriteResponse, LikeResponse,
    RecommendationDto, RecommendationItem, VideoItem,
};
use lumora_core::LumoraError;
use tracing::{debug, warn};

use crate::mapper::{convert_recommendation, map_content_to_video_item};

/// Store for browsing, detail, search, recommendations and toggles.
pub struct ContentStore {
    client: ApiClient,
    videos: Vec<VideoItem>,
    current: Option<VideoItem>,
    search_results: Vec<VideoItem>,
    recommended_articles: Vec<RecommendationItem>,
    recommended_videos: Vec<RecommendationItem>,
    viewed: HashSet<ContentId>,
    loading: bool,
    error: Option<String>,
}

impl ContentStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            videos: Vec::new(),
            current: None,
            search_results: Vec::new(),
            recommended_articles: Vec::new(),
            recommended_videos: Vec::new(),
            viewed: HashSet::new(),
            loading: false,
            error: None,
        }
    }

    pub fn videos(&self) -> &[VideoItem] {
        &self.videos
    }

    /// Only the items visible to regular browsing.
    pub fn approved_videos(&self) -> impl Iterator<Item = &VideoItem> {
        self.videos.iter().filter(|v| v.status == ContentStatus::Approved)
    }

    pub fn current(&self) -> Option<&VideoItem> {
        self.current.as_ref()
    }

    pub fn search_results(&self) -> &[VideoItem] {
        &self.search_results
    }

    pub fn recommended_articles(&self) -> &[RecommendationItem] {
        &self.recommended_articles
    }

    pub fn recommended_videos(&self) -> &[RecommendationItem] {
        &self.recommended_videos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the browsing list wholesale (e.g. from a tag page).
    pub fn replace_videos(&mut self, videos: Vec<VideoItem>) {
        self.videos = videos;
    }

    /// Records a view locally; returns `true` the first time an id is
    /// seen, so callers fire the view-count request at most once per
    /// session.
    pub fn mark_viewed(&mut self, content_id: ContentId) -> bool {
        self.viewed.insert(content_id)
    }

    /// Full-text search. Unlike the list fetches, a failure here clears
    /// the previous results so the view never shows hits for an older
    /// query.
    pub async fn fetch_search(&mut self, query: &str) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;

        let result = self
            .client
            .get_json::<Vec<ContentDto>>(&format!("/api/contents/search/{query}"), &[])
            .await;
        self.loading = false;

        match result {
            Ok(list) => {
                self.search_results = list.iter().map(map_content_to_video_item).collect();
                Ok(())
            }
            Err(e) => {
                self.search_results.clear();
                Err(self.fail(e))
            }
        }
    }

    /// Loads the real-time recommendation feed and splits it by kind.
    /// Both halves are cleared on failure.
    pub async fn fetch_recommendations(&mut self) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;

        let result = self
            .client
            .get_json::<Vec<RecommendationDto>>("/api/recommend/real-time", &[])
            .await;
        self.loading = false;

        match result {
            Ok(feed) => {
                self.recommended_articles = feed
                    .iter()
                    .filter(|r| r.content_metadata.kind == ContentType::Article)
                    .map(convert_recommendation)
                    .collect();
                self.recommended_videos = feed
                    .iter()
                    .filter(|r| r.content_metadata.kind == ContentType::Video)
                    .map(convert_recommendation)
                    .collect();
                debug!(
                    articles = self.recommended_articles.len(),
                    videos = self.recommended_videos.len(),
                    "recommendation feed loaded"
                );
                Ok(())
            }
            Err(e) => {
                self.recommended_articles.clear();
                self.recommended_videos.clear();
                Err(self.fail(e))
            }
        }
    }

    pub async fn fetch_video_detail(&mut self, content_id: ContentId) -> Result<(), LumoraError> {
        self.fetch_detail("videos", content_id).await
    }

    pub async fn fetch_article_detail(&mut self, content_id: ContentId) -> Result<(), LumoraError> {
        self.fetch_detail("articles", content_id).await
    }

    async fn fetch_detail(&mut self, segment: &str, content_id: ContentId) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;

        let result = self
            .client
            .get_json::<ContentDto>(&format!("/api/contents/{segment}/{}", content_id.0), &[])
            .await;
        self.loading = false;

        match result {
            Ok(dto) => {
                self.current = Some(map_content_to_video_item(&dto));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Like/unlike. Nothing changes until the server answers; the
    /// response counts are then written to every held copy of the item.
    /// Unknown ids are ignored.
    pub async fn toggle_like(&mut self, content_id: ContentId) -> Result<(), LumoraError> {
        let Some(was_liked) = self.liked_state(content_id) else {
            warn!(content_id = content_id.0, "like toggle for unknown content");
            return Ok(());
        };

        let path = format!("/api/likes/{}", content_id.0);
        let result: Result<LikeResponse, _> = if was_liked {
            self.client.delete_json(&path).await
        } else {
            self.client.post_json(&path, &serde_json::json!({})).await
        };

        let response = result.map_err(|e| self.fail(e))?;
        self.apply_to_copies(content_id, |item| {
            item.is_liked = response.is_liked;
            item.likes = response.like_count;
        });
        Ok(())
    }

    /// Favorite/unfavorite, optimistically. The flag flips and the count
    /// moves by one before the request; the response then overwrites
    /// both. A failed request reports the error but does not undo the
    /// flip. Unknown ids are ignored.
    pub async fn toggle_favorite(&mut self, content_id: ContentId) -> Result<(), LumoraError> {
        let Some(was_favorited) = self.favorited_state(content_id) else {
            warn!(content_id = content_id.0, "favorite toggle for unknown content");
            return Ok(());
        };

        self.apply_to_copies(content_id, |item| {
            item.is_favorited = !was_favorited;
            item.favorites = if was_favorited {
                item.favorites.saturating_sub(1)
            } else {
                item.favorites + 1
            };
        });

        let path = format!("/api/favorites/{}", content_id.0);
        let result: Result<FavoriteResponse, _> = if was_favorited {
            self.client.delete_json(&path).await
        } else {
            self.client.post_json(&path, &serde_json::json!({})).await
        };

        let response = result.map_err(|e| self.fail(e))?;
        self.apply_to_copies(content_id, |item| {
            item.is_favorited = response.is_favorited;
            item.favorites = response.favorite_count;
        });
        Ok(())
    }

    fn liked_state(&self, content_id: ContentId) -> Option<bool> {
        self.find(content_id).map(|item| item.is_liked)
    }

    fn favorited_state(&self, content_id: ContentId) -> Option<bool> {
        self.find(content_id).map(|item| item.is_favorited)
    }

    fn find(&self, content_id: ContentId) -> Option<&VideoItem> {
        self.current
            .as_ref()
            .filter(|item| item.content_id == content_id)
            .or_else(|| self.videos.iter().find(|item| item.content_id == content_id))
    }

    // The detail item and the list row are separate copies; a toggle must
    // hit both or the list goes stale when the detail view closes.
    fn apply_to_copies(&mut self, content_id: ContentId, apply: impl Fn(&mut VideoItem)) {
        if let Some(item) = self.current.as_mut().filter(|i| i.content_id == content_id) {
            apply(item);
        }
        if let Some(item) = self.videos.iter_mut().find(|i| i.content_id == content_id) {
            apply(item);
        }
    }

    fn fail(&mut self, err: LumoraError) -> LumoraError {
        self.error = Some(err.user_message());
        err
    }
}
