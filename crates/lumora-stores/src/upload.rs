// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content submission (multipart upload).

use lumora_client::ApiClient;
use lumora_core::types::{ContentId, ContentType, TagId};
use lumora_core::LumoraError;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

/// Metadata for a new submission.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub kind: ContentType,
    pub tag_ids: Vec<TagId>,
}

/// An in-memory file to attach to the submission.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl FilePart {
    fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.filename)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    content_id: ContentId,
}

/// Upload store. Submissions land in the moderation queue as `PENDING`.
pub struct UploadStore {
    client: ApiClient,
    submitting: bool,
    error: Option<String>,
}

impl UploadStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            submitting: false,
            error: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submits new content with its media file and optional cover image.
    /// Requires an installed bearer token; rejected locally otherwise.
    pub async fn submit(
        &mut self,
        content: NewContent,
        file: FilePart,
        cover: Option<FilePart>,
    ) -> Result<ContentId, LumoraError> {
        if !self.client.is_authenticated() {
            return Err(self.fail(LumoraError::Unauthorized));
        }

        self.submitting = true;
        self.error = None;

        let mut form = Form::new()
            .text("title", content.title)
            .text("description", content.description)
            .text("type", content.kind.to_string());
        for tag_id in &content.tag_ids {
            form = form.text("tagIds", tag_id.0.to_string());
        }
        form = form.part("contentFile", file.into_part());
        if let Some(cover) = cover {
            form = form.part("coverImage", cover.into_part());
        }

        let result = self
            .client
            .post_multipart::<UploadResponse>("/api/contents", form)
            .await;
        self.submitting = false;

        match result {
            Ok(response) => {
                info!(content_id = response.content_id.0, "content submitted");
                Ok(response.content_id)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, err: LumoraError) -> LumoraError {
        self.error = Some(err.user_message());
        err
    }
}

#[cfg(test)]
mod tests {
    use lumora_client::TokenSlot;
    use lumora_config::ApiConfig;
    use secrecy::SecretString;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, token: TokenSlot) -> ApiClient {
        let config = ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, token).unwrap()
    }

    fn new_content() -> NewContent {
        NewContent {
            title: "Crab migration".into(),
            description: "A short film".into(),
            kind: ContentType::Video,
            tag_ids: vec![TagId(1), TagId(4)],
        }
    }

    fn video_file() -> FilePart {
        FilePart {
            bytes: vec![0u8; 16],
            filename: "crab.mp4".into(),
        }
    }

    #[tokio::test]
    async fn submit_posts_multipart_and_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contents"))
            .and(header_exists("authorization"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"contentId": 42})),
            )
            .mount(&server)
            .await;

        let token = TokenSlot::new();
        token.set(SecretString::from("jwt-abc"));
        let mut store = UploadStore::new(client_for(&server, token));

        let id = store
            .submit(new_content(), video_file(), None)
            .await
            .unwrap();
        assert_eq!(id, ContentId(42));
        assert!(!store.is_submitting());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn submit_without_token_is_rejected_locally() {
        let server = MockServer::start().await;
        // No mocks: a request here would 404 rather than 401.
        let mut store = UploadStore::new(client_for(&server, TokenSlot::new()));

        let result = store.submit(new_content(), video_file(), None).await;
        assert!(matches!(result, Err(LumoraError::Unauthorized)));
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn failed_submit_records_the_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contents"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "title required"
            })))
            .mount(&server)
            .await;

        let token = TokenSlot::new();
        token.set(SecretString::from("jwt-abc"));
        let mut store = UploadStore::new(client_for(&server, token));

        let result = store.submit(new_content(), video_file(), None).await;
        assert!(result.is_err());
        assert_eq!(store.error(), Some("title required"));
        assert!(!store.is_submitting());
    }
}
