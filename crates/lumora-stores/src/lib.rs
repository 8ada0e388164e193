// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource state stores for the Lumora SDK.
//!
//! Each store owns one slice of client state (tags, users, pending
//! content, comments, history, notifications, uploads) and talks to the
//! backend through a cloned [`lumora_client::ApiClient`]. Stores take
//! `&mut self` for every mutation, so state transitions are strictly
//! ordered per store; share one across tasks behind a lock if needed.

pub mod audit;
pub mod comments;
pub mod content;
pub mod dashboard;
pub mod history;
pub mod mapper;
pub mod notifications;
pub mod tags;
pub mod upload;
pub mod users;

pub use audit::{AuditQuery, ContentAuditStore, PendingItem, ReviewDecision};
pub use comments::CommentStore;
pub use content::ContentStore;
pub use dashboard::{
    ContentTypeSlice, DashboardStats, DashboardStore, FormattedStats, TimeRange, UserGrowth,
};
pub use history::{HistoryKind, HistoryStore};
pub use notifications::NotificationStore;
pub use tags::{NavTagList, TagAdminStore};
pub use upload::{FilePart, NewContent, UploadStore};
pub use users::{BatchUserOperation, NewUser, UserAdminStore, UserQuery};
