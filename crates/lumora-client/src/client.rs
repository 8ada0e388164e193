// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared HTTP client every store talks through.
//!
//! Handles bearer attachment from the [`TokenSlot`], the fixed client-wide
//! timeout, multipart uploads, and error normalization: 401 tears the
//! session down via the registered hook, structured 4xx bodies become
//! [`LumoraError::Validation`] with field messages concatenated.

use std::sync::Arc;
use std::time::Duration;

use lumora_config::ApiConfig;
use lumora_core::LumoraError;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::envelope::ApiFailure;
use crate::token::TokenSlot;

/// Callback fired when the backend answers 401 on an authenticated request.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Shared HTTP client for the Lumora backend.
///
/// Cheap to clone; clones share the connection pool, the token slot, and
/// the unauthorized hook. Constructed once from config at process start
/// and handed to every store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: TokenSlot,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish()
    }
}

impl ApiClient {
    /// Creates a client from config. The token slot is shared with the
    /// session store so logins take effect on the next request.
    pub fn new(config: &ApiConfig, token: TokenSlot) -> Result<Self, LumoraError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LumoraError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            on_unauthorized: None,
        })
    }

    /// Registers the forced-logout hook invoked on any 401 response.
    ///
    /// The client clears the token slot itself; the hook is for the
    /// embedding application (navigate to login, drop store state).
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    /// Handle to the shared token slot.
    pub fn token(&self) -> &TokenSlot {
        &self.token
    }

    /// True when a bearer token is currently installed.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_set()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- JSON verbs ---

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, LumoraError> {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Self::parse(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, LumoraError> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::parse(response).await
    }

    /// POST where the response body is irrelevant (drained, not parsed).
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), LumoraError> {
        self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(())
    }

    pub async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), LumoraError> {
        self.send(self.request(Method::PUT, path).json(body)).await?;
        Ok(())
    }

    /// PATCH carrying its arguments as query parameters, no body.
    pub async fn patch_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), LumoraError> {
        self.send(self.request(Method::PATCH, path).query(query)).await?;
        Ok(())
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LumoraError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        Self::parse(response).await
    }

    pub async fn delete_unit(&self, path: &str) -> Result<(), LumoraError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Multipart POST (uploads). reqwest sets the boundary content type.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, LumoraError> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        Self::parse(response).await
    }

    /// GET returning the raw body (admin export endpoints).
    pub async fn get_bytes(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<u8>, LumoraError> {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        let bytes = response.bytes().await.map_err(|e| LumoraError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(bytes.to_vec())
    }

    // --- Internals ---

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, url);
        if let Some(token) = self.token.get() {
            req = req.bearer_auth(token.expose_secret());
        }
        req
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, LumoraError> {
        let response = req.send().await.map_err(|e| LumoraError::Transport {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(status = %status, "response received");

        if status.is_success() {
            return Ok(response);
        }
        Err(self.normalize_failure(response).await)
    }

    /// Maps a non-success response onto the error taxonomy.
    async fn normalize_failure(&self, response: reqwest::Response) -> LumoraError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            warn!("credential rejected, tearing session down");
            self.token.clear();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return LumoraError::Unauthorized;
        }

        if status.is_client_error() {
            if let Ok(failure) = serde_json::from_str::<ApiFailure>(&body) {
                if failure.message.is_some() || failure.data.is_some() {
                    let (message, field_errors) = failure.normalized();
                    return LumoraError::Validation {
                        message,
                        field_errors,
                    };
                }
            }
        }

        LumoraError::Api {
            status: status.as_u16(),
            message: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, LumoraError> {
        let body = response.text().await.map_err(|e| LumoraError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| LumoraError::Internal(format!(
            "failed to parse API response: {e}"
        )))
    }
}
