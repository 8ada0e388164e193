// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session store: bearer credential plus profile.
//!
//! Single process-wide instance. The token lives in the [`TokenSlot`]
//! shared with the HTTP client, the profile here, and both are mirrored
//! into the injected [`CredentialStore`]. A failed action leaves prior
//! state untouched.

use std::sync::Arc;

use lumora_client::ApiClient;
use lumora_core::types::{AuthResponse, SessionUser, UserRole, UserStatus};
use lumora_core::{CredentialStore, LumoraError, PersistedCredential};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const DEFAULT_AVATAR: &str = "/default-avatar.png";
const GUEST_NAME: &str = "Guest";

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Partial profile update; absent fields are left unchanged server-side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvatarResponse {
    avatar_url: String,
}

/// Hook run after `logout()` finishes tearing the session down. The
/// embedding application uses it to discard all other store state (the
/// SDK analogue of the web client's hard reload).
pub type TeardownHook = Box<dyn Fn() + Send + Sync>;

/// Holds the authenticated user and drives every auth flow.
pub struct SessionStore {
    client: ApiClient,
    credentials: Arc<dyn CredentialStore>,
    user: Option<SessionUser>,
    error: Option<String>,
    on_teardown: Option<TeardownHook>,
}

impl SessionStore {
    /// Constructs the store and restores any persisted credential.
    ///
    /// Restore never fails construction: an unreadable or corrupt
    /// credential leaves the store signed out.
    pub async fn restore(client: ApiClient, credentials: Arc<dyn CredentialStore>) -> Self {
        let user = match credentials.load().await {
            Ok(Some(persisted)) => {
                client.token().set(SecretString::from(persisted.token));
                debug!(username = %persisted.user.username, "session restored from storage");
                Some(persisted.user)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read persisted credential, starting signed out");
                None
            }
        };

        Self {
            client,
            credentials,
            user,
            error: None,
            on_teardown: None,
        }
    }

    /// Registers the post-logout hook.
    pub fn with_teardown_hook(mut self, hook: TeardownHook) -> Self {
        self.on_teardown = Some(hook);
        self
    }

    // --- Auth flows ---

    pub async fn login(&mut self, request: &LoginRequest) -> Result<(), LumoraError> {
        self.error = None;
        let response: AuthResponse = self
            .client
            .post_json("/api/auth/login", request)
            .await
            .map_err(|e| self.fail("login", e))?;
        self.apply_auth(response).await?;
        info!("login succeeded");
        Ok(())
    }

    pub async fn register(&mut self, request: &RegisterRequest) -> Result<(), LumoraError> {
        self.error = None;
        let response: AuthResponse = self
            .client
            .post_json("/api/auth/register", request)
            .await
            .map_err(|e| self.fail("register", e))?;
        self.apply_auth(response).await?;
        info!("registration succeeded");
        Ok(())
    }

    /// Clears memory and persisted credential, then runs the teardown hook.
    pub async fn logout(&mut self) {
        self.client.token().clear();
        self.user = None;
        self.error = None;
        if let Err(e) = self.credentials.clear().await {
            warn!(error = %e, "failed to clear persisted credential");
        }
        if let Some(hook) = &self.on_teardown {
            hook();
        }
        info!("session torn down");
    }

    /// Changes the password, then forces re-authentication.
    pub async fn change_password(
        &mut self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), LumoraError> {
        self.error = None;
        let body = serde_json::json!({
            "oldPassword": old_password,
            "newPassword": new_password,
        });
        self.client
            .post_unit("/api/auth/change-password", &body)
            .await
            .map_err(|e| self.fail("password change", e))?;
        // The backend invalidates the token on password change.
        self.logout().await;
        Ok(())
    }

    /// Merges the response into the current profile and re-persists.
    pub async fn update_profile(
        &mut self,
        update: &ProfileUpdate,
    ) -> Result<SessionUser, LumoraError> {
        self.error = None;
        let response: AuthResponse = self
            .client
            .post_json("/api/auth/profile", update)
            .await
            .map_err(|e| self.fail("profile update", e))?;
        self.apply_auth(response).await?;
        self.user
            .clone()
            .ok_or_else(|| LumoraError::Internal("profile missing after successful update".into()))
    }

    /// Uploads a new avatar image and patches the local profile.
    pub async fn upload_avatar(
        &mut self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<String, LumoraError> {
        self.error = None;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("avatar", part);
        let response: AvatarResponse = self
            .client
            .post_multipart("/api/auth/upload-avatar", form)
            .await
            .map_err(|e| self.fail("avatar upload", e))?;

        if let Some(user) = &mut self.user {
            user.avatar_url = Some(response.avatar_url.clone());
        }
        self.persist().await?;
        Ok(response.avatar_url)
    }

    // --- Derived state ---

    pub fn is_authenticated(&self) -> bool {
        self.client.token().is_set()
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.role == UserRole::Admin)
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Avatar URL with a fixed fallback for signed-out or avatar-less users.
    pub fn avatar_or_default(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.avatar_url.as_deref())
            .unwrap_or(DEFAULT_AVATAR)
    }

    /// Display name with a fixed guest fallback.
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or(GUEST_NAME)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // --- Internals ---

    async fn apply_auth(&mut self, response: AuthResponse) -> Result<(), LumoraError> {
        self.client
            .token()
            .set(SecretString::from(response.token.clone()));
        // Merge, don't replace: a response omitting avatarUrl must not
        // wipe an avatar set earlier in the session.
        let avatar_url = response
            .avatar_url
            .or_else(|| self.user.as_ref().and_then(|u| u.avatar_url.clone()));
        self.user = Some(SessionUser {
            user_id: response.user_id,
            username: response.username,
            role: response.role,
            avatar_url,
            email: response.email,
        });
        self.persist_with_token(response.token).await
    }

    async fn persist(&mut self) -> Result<(), LumoraError> {
        let Some(token) = self.client.token().get() else {
            return Ok(());
        };
        use secrecy::ExposeSecret;
        let token = token.expose_secret().to_string();
        self.persist_with_token(token).await
    }

    async fn persist_with_token(&mut self, token: String) -> Result<(), LumoraError> {
        let Some(user) = &self.user else {
            return Ok(());
        };
        let persisted = PersistedCredential {
            token,
            user: user.clone(),
        };
        self.credentials
            .save(&persisted)
            .await
            .map_err(|e| self.fail("credential persistence", e))
    }

    fn fail(&mut self, action: &str, err: LumoraError) -> LumoraError {
        self.error = Some(format!("{action} failed: {}", err.user_message()));
        err
    }
}
