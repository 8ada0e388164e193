// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lumora client SDK.
//!
//! One [`Lumora`] handle per process: it owns the configuration, the
//! shared HTTP client, and the session, and hands out per-resource
//! stores that all share the same token slot. A login through the
//! session takes effect on every store's next request.
//!
//! ```no_run
//! use lumora::{Lumora, LoginRequest};
//!
//! # async fn run() -> Result<(), lumora::LumoraError> {
//! let mut app = Lumora::connect(lumora::LumoraConfig::default()).await?;
//!
//! app.session_mut()
//!     .login(&LoginRequest {
//!         username: "alice".into(),
//!         password: "secret".into(),
//!     })
//!     .await?;
//!
//! let mut tags = app.nav_tags();
//! tags.fetch().await?;
//! # Ok(())
//! # }
//! ```

pub use lumora_client::{ApiClient, TokenSlot, UnauthorizedHook};
pub use lumora_config::{LumoraConfig, StorageScope};
pub use lumora_core::types::{
    CommentId, CommentNode, ContentId, ContentStatus, ContentType, Tag, TagId, UserId, UserRole,
    UserStatus, VideoItem,
};
pub use lumora_core::{LumoraError, Page};
pub use lumora_session::{LoginRequest, ProfileUpdate, RegisterRequest, SessionStore};
pub use lumora_stores::{
    AuditQuery, BatchUserOperation, CommentStore, ContentAuditStore, ContentStore, DashboardStore,
    FilePart, HistoryKind, HistoryStore, NavTagList, NewContent, NewUser, NotificationStore,
    ReviewDecision, TagAdminStore, TimeRange, UploadStore, UserAdminStore, UserQuery,
};

use lumora_session::credential_store_from_config;
use tracing::info;

/// Top-level SDK handle.
pub struct Lumora {
    config: LumoraConfig,
    client: ApiClient,
    session: SessionStore,
}

impl Lumora {
    /// Validates the configuration, builds the shared client, and
    /// restores any persisted session.
    pub async fn connect(config: LumoraConfig) -> Result<Self, LumoraError> {
        lumora_config::validate(&config)?;

        let token = TokenSlot::new();
        let client = ApiClient::new(&config.api, token)?;
        let credentials = credential_store_from_config(&config.session);
        let session = SessionStore::restore(client.clone(), credentials).await;

        info!(
            base_url = %config.api.base_url,
            restored = session.is_authenticated(),
            "lumora client ready"
        );
        Ok(Self {
            config,
            client,
            session,
        })
    }

    pub fn config(&self) -> &LumoraConfig {
        &self.config
    }

    /// The shared HTTP client; clone it to hand to custom callers.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    // --- Store factories. Each store shares the client (and thus the
    // token slot) but owns its own state.

    pub fn content(&self) -> ContentStore {
        ContentStore::new(self.client.clone())
    }

    pub fn nav_tags(&self) -> NavTagList {
        NavTagList::new(self.client.clone())
    }

    pub fn tag_admin(&self) -> TagAdminStore {
        TagAdminStore::new(self.client.clone())
    }

    /// The user admin store needs the caller's own id for the self-role
    /// guard; it is taken from the current session.
    pub fn user_admin(&self) -> UserAdminStore {
        let self_id = self.session.current_user().map(|u| u.user_id);
        UserAdminStore::new(self.client.clone(), self_id)
    }

    pub fn audit(&self) -> ContentAuditStore {
        ContentAuditStore::new(self.client.clone())
    }

    pub fn dashboard(&self) -> DashboardStore {
        DashboardStore::new(self.client.clone())
    }

    pub fn comments(&self) -> CommentStore {
        CommentStore::new(self.client.clone())
    }

    pub fn history(&self, kind: HistoryKind) -> HistoryStore {
        HistoryStore::new(self.client.clone(), kind)
    }

    pub fn notifications(&self) -> NotificationStore {
        NotificationStore::new(self.client.clone())
    }

    pub fn upload(&self) -> UploadStore {
        UploadStore::new(self.client.clone())
    }
}

/// Installs a global tracing subscriber honoring the configured level
/// and the `RUST_LOG` override. Call once at startup; later calls are
/// ignored.
pub fn init_tracing(config: &LumoraConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.clone()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
