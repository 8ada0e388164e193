// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Lumora stores.
//!
//! Wire DTOs mirror the backend's JSON (camelCase field names); view models
//! are the reshaped structures the stores hold for rendering. The mapping
//! between the two lives in `lumora-stores::mapper`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a content item (video, article, post).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub i64);

/// Unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Unique identifier for a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub i64);

/// Unique identifier for a comment; unique across a whole comment tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub i64);

/// Moderation status of a content item. Server-authoritative; the client
/// only requests transitions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    Pending,
    Approved,
    Rejected,
}

/// Kind of content item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Video,
    Article,
    Post,
    Comment,
}

/// System role, in ascending order of privilege.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
}

/// Account status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserStatus {
    Active,
    Disabled,
}

// --- Tags ---

/// Admin-side tag with usage statistics and recommendation weight.
/// Weight is editable independently of the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub tag_id: TagId,
    pub tag_name: String,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub weight: i32,
}

/// Lightweight tag reference attached to content items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    pub tag_id: TagId,
    pub tag_name: String,
}

// --- Content ---

/// Content item as returned by the backend (detail, search, pending list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    pub content_id: ContentId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub created_time: String,
    #[serde(default)]
    pub last_modified_time: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    pub status: ContentStatus,
    #[serde(default)]
    pub review_notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub is_favorited: bool,
    #[serde(default)]
    pub author_url: Option<String>,
}

/// View-friendly content item held by the content and history stores.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoItem {
    pub content_id: ContentId,
    pub kind: ContentType,
    pub title: String,
    pub author: String,
    pub views: u64,
    pub cover: String,
    pub url: Option<String>,
    pub upload_time: String,
    pub status: ContentStatus,
    pub likes: u64,
    pub comments: u64,
    pub favorites: u64,
    pub is_liked: bool,
    pub is_favorited: bool,
    pub description: String,
    pub tag_names: Vec<String>,
    pub tag_ids: Vec<TagId>,
    pub author_url: Option<String>,
}

// --- Recommendations ---

/// Embedded metadata inside a recommendation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadataDto {
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub view_count: u64,
    pub created_time: String,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

/// One entry from the real-time recommendation feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    pub user_id: UserId,
    pub content_id: ContentId,
    pub recommend_score: f64,
    pub strategy: String,
    pub expire_time: String,
    pub created_time: String,
    pub content_metadata: ContentMetadataDto,
}

/// Reshaped content metadata for the recommendation feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSummary {
    pub content_id: ContentId,
    pub kind: ContentType,
    pub title: String,
    pub cover: String,
    pub author: String,
    pub description: String,
    pub likes: u64,
    pub comments: u64,
    pub favorites: u64,
    pub views: u64,
    pub created_time: Option<String>,
    pub tags: Vec<TagId>,
}

/// Fully reshaped recommendation entry (score rendered as a percentage).
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationItem {
    pub id: ContentId,
    pub user_id: UserId,
    pub score_percentage: String,
    pub strategy: String,
    pub expire_date: String,
    pub metadata: ContentSummary,
}

// --- Comments ---

/// Node in a nested comment tree. Unbounded depth; `replies` is always a
/// sequence, never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub comment_id: CommentId,
    pub content: String,
    pub username: String,
    pub create_time: String,
    #[serde(default)]
    pub replies: Vec<CommentNode>,
}

// --- Auth / users ---

/// Successful authentication response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub email: String,
}

/// Profile held by the session store and persisted alongside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub email: String,
}

/// Full user record for the admin user list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub registration_time: Option<String>,
    #[serde(default)]
    pub last_login_time: Option<String>,
}

// --- Toggles ---

/// Authoritative like state returned after a like/unlike request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub is_liked: bool,
    pub like_count: u64,
}

/// Authoritative favorite state returned after a favorite/unfavorite request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub is_favorited: bool,
    pub favorite_count: u64,
}
