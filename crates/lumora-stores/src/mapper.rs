// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure DTO-to-view translation.
//!
//! Stateless and deterministic: the only clock involved is the timestamp
//! inside the DTO. Field renames (`coverImageUrl` → `cover`), tag-object
//! to tag-id projection, fixed fallback text for missing optionals, and
//! `YYYY-MM-DD HH:mm` timestamp formatting all live here.

use chrono::{DateTime, NaiveDateTime};
use lumora_core::types::{
    ContentDto, ContentSummary, RecommendationDto, RecommendationItem, VideoItem,
};

pub const FALLBACK_TITLE: &str = "Untitled";
pub const FALLBACK_AUTHOR: &str = "Anonymous";
pub const FALLBACK_DESCRIPTION: &str = "No description yet";
const INVALID_TIME: &str = "invalid time";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats an ISO-8601 timestamp (with or without offset) as
/// `YYYY-MM-DD HH:mm`. Unparseable input yields a fixed placeholder.
pub fn format_timestamp(iso: &str) -> String {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(iso) {
        return with_offset.format(TIME_FORMAT).to_string();
    }
    // The backend emits naive timestamps like "2025-04-16T18:45:40.7674042".
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(TIME_FORMAT).to_string();
    }
    INVALID_TIME.to_string()
}

/// Reshapes a content DTO into the view model held by the content and
/// history stores.
pub fn map_content_to_video_item(dto: &ContentDto) -> VideoItem {
    VideoItem {
        content_id: dto.content_id,
        kind: dto.kind,
        title: dto.title.clone(),
        author: dto.author.clone().unwrap_or_default(),
        views: dto.view_count,
        cover: dto.cover_image_url.clone().unwrap_or_default(),
        url: dto.file_path.clone(),
        upload_time: format_timestamp(&dto.created_time),
        status: dto.status,
        likes: dto.like_count,
        comments: dto.comment_count,
        favorites: dto.favorite_count,
        is_liked: dto.is_liked,
        is_favorited: dto.is_favorited,
        description: dto.description.clone().unwrap_or_default(),
        tag_names: dto.tags.iter().map(|t| t.tag_name.clone()).collect(),
        tag_ids: dto.tags.iter().map(|t| t.tag_id).collect(),
        author_url: dto.author_url.clone(),
    }
}

/// Projects a recommendation entry down to its content metadata, with
/// fixed fallbacks for missing optionals.
pub fn recommendation_to_metadata(dto: &RecommendationDto) -> ContentSummary {
    let meta = &dto.content_metadata;
    ContentSummary {
        content_id: dto.content_id,
        kind: meta.kind,
        title: meta.title.clone().unwrap_or_else(|| FALLBACK_TITLE.into()),
        cover: meta.cover_image_url.clone().unwrap_or_default(),
        author: meta.author.clone().unwrap_or_else(|| FALLBACK_AUTHOR.into()),
        description: meta
            .description
            .clone()
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.into()),
        likes: meta.like_count,
        comments: meta.comment_count,
        favorites: meta.favorite_count,
        views: meta.view_count,
        created_time: Some(format_timestamp(&meta.created_time)),
        tags: meta.tags.iter().map(|t| t.tag_id).collect(),
    }
}

/// Full recommendation reshape: score rendered as a percentage with one
/// decimal, expiry formatted like every other timestamp.
pub fn convert_recommendation(dto: &RecommendationDto) -> RecommendationItem {
    RecommendationItem {
        id: dto.content_id,
        user_id: dto.user_id,
        score_percentage: format!("{:.1}%", dto.recommend_score * 100.0),
        strategy: dto.strategy.clone(),
        expire_date: format_timestamp(&dto.expire_time),
        metadata: recommendation_to_metadata(dto),
    }
}

#[cfg(test)]
mod tests {
    use lumora_core::types::{
        ContentId, ContentMetadataDto, ContentStatus, ContentType, TagId, TagRef, UserId,
    };

    use super::*;

    fn content_dto() -> ContentDto {
        serde_json::from_value(serde_json::json!({
            "contentId": 12,
            "title": "Crab migration",
            "description": "A short film",
            "createdTime": "2025-04-16T18:45:40.7674042",
            "type": "VIDEO",
            "filePath": "/uploads/crab.mp4",
            "coverImageUrl": "/uploads/crab.jpg",
            "viewCount": 100,
            "likeCount": 5,
            "commentCount": 2,
            "favoriteCount": 3,
            "status": "APPROVED",
            "tags": [
                {"tagId": 1, "tagName": "nature"},
                {"tagId": 4, "tagName": "ocean"}
            ],
            "author": "alice",
            "isLiked": true,
            "isFavorited": false
        }))
        .unwrap()
    }

    fn recommendation_dto() -> RecommendationDto {
        RecommendationDto {
            user_id: UserId(1),
            content_id: ContentId(3),
            recommend_score: 0.57775754,
            strategy: "real-time".into(),
            expire_time: "2025-04-17T18:45:40.7674042".into(),
            created_time: "2025-04-16T18:45:40.7674042".into(),
            content_metadata: ContentMetadataDto {
                kind: ContentType::Article,
                title: None,
                cover_image_url: None,
                author: None,
                description: None,
                like_count: 0,
                comment_count: 0,
                favorite_count: 0,
                view_count: 0,
                created_time: "2025-04-16T18:45:40.7674042".into(),
                tags: vec![TagRef {
                    tag_id: TagId(9),
                    tag_name: "news".into(),
                }],
            },
        }
    }

    #[test]
    fn timestamp_uses_fixed_pattern() {
        assert_eq!(format_timestamp("2025-04-16T18:45:40.7674042"), "2025-04-16 18:45");
        assert_eq!(format_timestamp("2025-04-16T18:45:40+00:00"), "2025-04-16 18:45");
    }

    #[test]
    fn unparseable_timestamp_yields_placeholder() {
        assert_eq!(format_timestamp("not a date"), "invalid time");
    }

    #[test]
    fn video_item_renames_and_projects() {
        let item = map_content_to_video_item(&content_dto());
        assert_eq!(item.content_id, ContentId(12));
        assert_eq!(item.cover, "/uploads/crab.jpg");
        assert_eq!(item.url.as_deref(), Some("/uploads/crab.mp4"));
        assert_eq!(item.upload_time, "2025-04-16 18:45");
        assert_eq!(item.tag_names, vec!["nature", "ocean"]);
        assert_eq!(item.tag_ids, vec![TagId(1), TagId(4)]);
        assert_eq!(item.status, ContentStatus::Approved);
        assert!(item.is_liked);
        assert!(!item.is_favorited);
    }

    #[test]
    fn mapping_is_deterministic() {
        let dto = content_dto();
        assert_eq!(map_content_to_video_item(&dto), map_content_to_video_item(&dto));

        let rec = recommendation_dto();
        assert_eq!(convert_recommendation(&rec), convert_recommendation(&rec));
    }

    #[test]
    fn metadata_falls_back_for_missing_optionals() {
        let summary = recommendation_to_metadata(&recommendation_dto());
        assert_eq!(summary.title, "Untitled");
        assert_eq!(summary.author, "Anonymous");
        assert_eq!(summary.description, "No description yet");
        assert_eq!(summary.tags, vec![TagId(9)]);
    }

    #[test]
    fn recommendation_score_renders_as_percentage() {
        let item = convert_recommendation(&recommendation_dto());
        assert_eq!(item.score_percentage, "57.8%");
        assert_eq!(item.expire_date, "2025-04-17 18:45");
        assert_eq!(item.id, ContentId(3));
    }
}
