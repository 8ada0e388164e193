// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tag stores.
//!
//! [`TagAdminStore`] is the paginated management list; every mutation
//! except the weight patch refetches the current page. [`NavTagList`] is
//! the flat public list the navigation bar renders, with an active-index
//! selection.

use lumora_client::ApiClient;
use lumora_core::types::{Tag, TagId};
use lumora_core::{LumoraError, Page, PageResponse};
use tracing::debug;

/// Paginated admin tag list with keyword filtering.
pub struct TagAdminStore {
    client: ApiClient,
    tags: Vec<Tag>,
    page: Page,
    keyword: String,
    loading: bool,
    error: Option<String>,
}

impl TagAdminStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tags: Vec::new(),
            page: Page::default(),
            keyword: String::new(),
            loading: false,
            error: None,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
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

    pub fn set_pagination(&mut self, page: u32, page_size: u32) {
        self.page.page = page;
        self.page.page_size = page_size;
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    /// Fetches the current page. On failure the previously loaded items
    /// stay in place (stale-but-present).
    pub async fn fetch(&mut self) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;

        let query = [
            ("page", self.page.page.to_string()),
            ("pageSize", self.page.page_size.to_string()),
            ("keyword", self.keyword.clone()),
        ];
        let result = self
            .client
            .get_json::<PageResponse<Tag>>("/api/admin/tags", &query)
            .await;
        self.loading = false;

        match result {
            Ok(response) => {
                self.page = response.page();
                self.tags = response.list;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Creates a tag, then refetches the current page so usage counts and
    /// ordering come from the server.
    pub async fn create(&mut self, name: &str, weight: i32) -> Result<Tag, LumoraError> {
        let body = serde_json::json!({ "tagName": name, "weight": weight });
        let created: Tag = self
            .client
            .post_json("/api/admin/tags", &body)
            .await
            .map_err(|e| self.fail(e))?;
        debug!(tag_id = created.tag_id.0, "tag created");
        self.fetch().await?;
        Ok(created)
    }

    pub async fn delete(&mut self, tag_id: TagId) -> Result<(), LumoraError> {
        self.client
            .delete_unit(&format!("/api/admin/tags/{}", tag_id.0))
            .await
            .map_err(|e| self.fail(e))?;
        self.fetch().await
    }

    /// Deletes several tags at once. An empty id list is a local no-op.
    pub async fn batch_delete(&mut self, tag_ids: &[TagId]) -> Result<(), LumoraError> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let body = serde_json::json!({ "tagIds": tag_ids });
        self.client
            .post_unit("/api/admin/tags/batch-delete", &body)
            .await
            .map_err(|e| self.fail(e))?;
        self.fetch().await
    }

    /// Updates a tag's weight and patches it locally; the response carries
    /// no derived state, so no refetch.
    pub async fn update_weight(&mut self, tag_id: TagId, weight: i32) -> Result<(), LumoraError> {
        self.error = None;
        let body = serde_json::json!({ "weight": weight });
        self.client
            .put_unit(&format!("/api/admin/tags/{}/weight", tag_id.0), &body)
            .await
            .map_err(|e| self.fail(e))?;

        if let Some(tag) = self.tags.iter_mut().find(|t| t.tag_id == tag_id) {
            tag.weight = weight;
        }
        Ok(())
    }

    fn fail(&mut self, err: LumoraError) -> LumoraError {
        self.error = Some(err.user_message());
        err
    }
}

/// Flat public tag list for the navigation bar.
pub struct NavTagList {
    client: ApiClient,
    tags: Vec<Tag>,
    active_index: Option<usize>,
    loading: bool,
}

impl NavTagList {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tags: Vec::new(),
            active_index: None,
            loading: false,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_tag(&self) -> Option<&Tag> {
        self.active_index.and_then(|i| self.tags.get(i))
    }

    pub async fn fetch(&mut self) -> Result<(), LumoraError> {
        self.loading = true;
        let result = self.client.get_json::<Vec<Tag>>("/api/tags", &[]).await;
        self.loading = false;
        self.tags = result?;
        Ok(())
    }

    /// Selects by position; out-of-range indices are ignored.
    pub fn set_active_index(&mut self, index: usize) {
        if index < self.tags.len() {
            self.active_index = Some(index);
        }
    }

    /// Selects by tag id; unknown ids leave the selection unchanged.
    pub fn set_active_by_tag_id(&mut self, tag_id: TagId) {
        if let Some(index) = self.tags.iter().position(|t| t.tag_id == tag_id) {
            self.active_index = Some(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use lumora_client::TokenSlot;
    use lumora_config::ApiConfig;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, TokenSlot::new()).unwrap()
    }

    fn tag_page(names: &[(i64, &str)], total: u64) -> serde_json::Value {
        serde_json::json!({
            "list": names.iter().map(|(id, name)| serde_json::json!({
                "tagId": id, "tagName": name, "usageCount": 0, "weight": 1
            })).collect::<Vec<_>>(),
            "total": total,
            "pageNum": 1,
            "pageSize": 10,
            "pages": total.div_ceil(10),
            "hasNextPage": total > 10
        })
    }

    #[tokio::test]
    async fn fetch_replaces_items_and_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/tags"))
            .and(query_param("keyword", "na"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(tag_page(&[(1, "nature")], 1)),
            )
            .mount(&server)
            .await;

        let mut store = TagAdminStore::new(client_for(&server));
        store.set_keyword("na");
        store.fetch().await.unwrap();

        assert_eq!(store.tags().len(), 1);
        assert_eq!(store.tags()[0].tag_name, "nature");
        assert_eq!(store.page().total, 1);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn fetch_twice_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(tag_page(&[(1, "nature")], 1)),
            )
            .mount(&server)
            .await;

        let mut store = TagAdminStore::new(client_for(&server));
        store.fetch().await.unwrap();
        let (first_tags, first_page) = (store.tags().to_vec(), store.page().clone());
        store.fetch().await.unwrap();
        assert_eq!(store.tags(), first_tags.as_slice());
        assert_eq!(store.page(), &first_page);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_stale_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(tag_page(&[(1, "nature")], 1)),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/admin/tags"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut store = TagAdminStore::new(client_for(&server));
        store.fetch().await.unwrap();
        assert_eq!(store.tags().len(), 1);

        let result = store.fetch().await;
        assert!(result.is_err());
        assert_eq!(store.tags().len(), 1, "stale items must survive a failed fetch");
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn create_refetches_the_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/admin/tags"))
            .and(body_partial_json(serde_json::json!({"tagName": "ocean", "weight": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tagId": 4, "tagName": "ocean", "usageCount": 0, "weight": 3
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/admin/tags"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(tag_page(&[(1, "nature"), (4, "ocean")], 2)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut store = TagAdminStore::new(client_for(&server));
        let created = store.create("ocean", 3).await.unwrap();
        assert_eq!(created.tag_id, TagId(4));
        assert_eq!(store.tags().len(), 2);
    }

    #[tokio::test]
    async fn batch_delete_empty_is_a_no_op() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would 404 and fail the call.
        let mut store = TagAdminStore::new(client_for(&server));
        store.batch_delete(&[]).await.unwrap();
        assert_eq!(store.page().total, 0);
        assert_eq!(store.page().page, 1);
    }

    #[tokio::test]
    async fn update_weight_patches_locally_without_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(tag_page(&[(1, "nature")], 1)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/admin/tags/1/weight"))
            .and(body_partial_json(serde_json::json!({"weight": 9})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let mut store = TagAdminStore::new(client_for(&server));
        store.fetch().await.unwrap();
        store.update_weight(TagId(1), 9).await.unwrap();
        assert_eq!(store.tags()[0].weight, 9);
    }

    #[tokio::test]
    async fn nav_list_selects_by_id_and_ignores_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"tagId": 1, "tagName": "nature", "usageCount": 3, "weight": 1},
                {"tagId": 4, "tagName": "ocean", "usageCount": 1, "weight": 2}
            ])))
            .mount(&server)
            .await;

        let mut nav = NavTagList::new(client_for(&server));
        nav.fetch().await.unwrap();
        assert!(nav.active_tag().is_none());

        nav.set_active_by_tag_id(TagId(4));
        assert_eq!(nav.active_index(), Some(1));

        nav.set_active_by_tag_id(TagId(99));
        assert_eq!(nav.active_index(), Some(1), "unknown id leaves selection");

        nav.set_active_index(7);
        assert_eq!(nav.active_index(), Some(1), "out of range is ignored");
    }
}
