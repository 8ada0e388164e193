// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nested comment tree for one piece of content.
//!
//! The server returns the full tree; replies posted locally are grafted
//! into it without a refetch. Top-level comments go newest-first, replies
//! append in posting order under their parent.

use lumora_client::ApiClient;
use lumora_core::types::{CommentId, CommentNode, ContentId};
use lumora_core::LumoraError;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewComment<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<CommentId>,
}

/// Comment tree store, bound to one content id at a time.
pub struct CommentStore {
    client: ApiClient,
    content_id: Option<ContentId>,
    comments: Vec<CommentNode>,
    loading: bool,
    error: Option<String>,
}

impl CommentStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            content_id: None,
            comments: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn comments(&self) -> &[CommentNode] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loads the full tree for `content_id`, replacing whatever was held.
    pub async fn fetch_tree(&mut self, content_id: ContentId) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;
        self.content_id = Some(content_id);

        let result = self
            .client
            .get_json::<Vec<CommentNode>>(
                &format!("/api/contents/{}/comments", content_id.0),
                &[],
            )
            .await;
        self.loading = false;

        match result {
            Ok(tree) => {
                self.comments = tree;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Posts a comment and grafts the returned node into the local tree.
    ///
    /// Without a parent the new node becomes the newest top-level comment.
    /// With a parent it is appended to that parent's replies; if the parent
    /// is no longer in the tree the graft is skipped and the next fetch
    /// will pick the reply up.
    pub async fn add_comment(
        &mut self,
        text: &str,
        parent_id: Option<CommentId>,
    ) -> Result<CommentNode, LumoraError> {
        let content_id = self
            .content_id
            .ok_or_else(|| LumoraError::Internal("no content loaded".into()))?;

        let body = NewComment {
            content: text,
            parent_id,
        };
        let node: CommentNode = self
            .client
            .post_json(&format!("/api/contents/{}/comments", content_id.0), &body)
            .await
            .map_err(|e| self.fail(e))?;

        match parent_id {
            None => self.comments.insert(0, node.clone()),
            Some(parent) => match find_node_mut(&mut self.comments, parent) {
                Some(parent_node) => parent_node.replies.push(node.clone()),
                None => {
                    warn!(parent = parent.0, "reply parent not in local tree");
                }
            },
        }
        Ok(node)
    }

    /// Depth-first lookup across the whole tree.
    pub fn find_by_id(&self, comment_id: CommentId) -> Option<&CommentNode> {
        find_node(&self.comments, comment_id)
    }

    /// Total node count, replies included.
    pub fn len(&self) -> usize {
        fn count(nodes: &[CommentNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.replies)).sum()
        }
        count(&self.comments)
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    fn fail(&mut self, err: LumoraError) -> LumoraError {
        self.error = Some(err.user_message());
        err
    }
}

fn find_node(nodes: &[CommentNode], id: CommentId) -> Option<&CommentNode> {
    for node in nodes {
        if node.comment_id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.replies, id) {
            return Some(found);
        }
    }
    None
}

fn find_node_mut(nodes: &mut [CommentNode], id: CommentId) -> Option<&mut CommentNode> {
    for node in nodes {
        if node.comment_id == id {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.replies, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use lumora_client::TokenSlot;
    use lumora_config::ApiConfig;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, TokenSlot::new()).unwrap()
    }

    fn tree_json() -> serde_json::Value {
        serde_json::json!([
            {
                "commentId": 1,
                "content": "first",
                "username": "alice",
                "createTime": "2025-04-16T09:00:00",
                "replies": [
                    {
                        "commentId": 2,
                        "content": "nested",
                        "username": "bob",
                        "createTime": "2025-04-16T09:05:00",
                        "replies": []
                    }
                ]
            },
            {
                "commentId": 3,
                "content": "second",
                "username": "carol",
                "createTime": "2025-04-16T09:10:00"
            }
        ])
    }

    async fn mount_tree(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/contents/7/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tree_json()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn fetch_builds_the_nested_tree() {
        let server = MockServer::start().await;
        mount_tree(&server).await;

        let mut store = CommentStore::new(client_for(&server));
        store.fetch_tree(ContentId(7)).await.unwrap();

        assert_eq!(store.comments().len(), 2);
        assert_eq!(store.len(), 3);
        let nested = store.find_by_id(CommentId(2)).unwrap();
        assert_eq!(nested.username, "bob");
    }

    #[tokio::test]
    async fn top_level_comment_goes_first() {
        let server = MockServer::start().await;
        mount_tree(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/contents/7/comments"))
            .and(body_partial_json(serde_json::json!({"content": "newest"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "commentId": 9,
                "content": "newest",
                "username": "dave",
                "createTime": "2025-04-16T10:00:00"
            })))
            .mount(&server)
            .await;

        let mut store = CommentStore::new(client_for(&server));
        store.fetch_tree(ContentId(7)).await.unwrap();
        store.add_comment("newest", None).await.unwrap();

        assert_eq!(store.comments()[0].comment_id, CommentId(9));
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn reply_lands_under_its_parent() {
        let server = MockServer::start().await;
        mount_tree(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/contents/7/comments"))
            .and(body_partial_json(serde_json::json!({"parentId": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "commentId": 10,
                "content": "me too",
                "username": "dave",
                "createTime": "2025-04-16T10:00:00"
            })))
            .mount(&server)
            .await;

        let mut store = CommentStore::new(client_for(&server));
        store.fetch_tree(ContentId(7)).await.unwrap();
        store.add_comment("me too", Some(CommentId(1))).await.unwrap();

        let parent = store.find_by_id(CommentId(1)).unwrap();
        assert_eq!(parent.replies.len(), 2);
        assert_eq!(parent.replies[1].comment_id, CommentId(10));
    }

    #[tokio::test]
    async fn reply_to_missing_parent_leaves_tree_unchanged() {
        let server = MockServer::start().await;
        mount_tree(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/contents/7/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "commentId": 11,
                "content": "orphan",
                "username": "dave",
                "createTime": "2025-04-16T10:00:00"
            })))
            .mount(&server)
            .await;

        let mut store = CommentStore::new(client_for(&server));
        store.fetch_tree(ContentId(7)).await.unwrap();

        store.add_comment("orphan", Some(CommentId(999))).await.unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.find_by_id(CommentId(11)).is_none());
    }

    #[tokio::test]
    async fn add_without_fetch_is_rejected() {
        let server = MockServer::start().await;
        let mut store = CommentStore::new(client_for(&server));
        let result = store.add_comment("hello", None).await;
        assert!(result.is_err());
    }
}
