//! Data Transfer Objects - request/response types for the API.
//!
//! Enumerations travel as their display strings (`"pending"`,
//! `"Analytics & KPIs"`); the server parses them on the way in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Editable fields of a post, as submitted by the editor form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Free-form tags. Entries may themselves be comma-separated.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(flatten)]
    pub post: PostFields,
    /// `"draft"` or `"pending"`. Defaults to `"draft"`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Request to replace the content of an existing post.
pub type UpdatePostRequest = PostFields;

/// A post as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub author_id: String,
    pub author_name: String,
    pub status: String,
    pub reading_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total: usize,
}

impl From<Vec<PostResponse>> for PostListResponse {
    fn from(posts: Vec<PostResponse>) -> Self {
        Self {
            total: posts.len(),
            posts,
        }
    }
}

/// Admin dashboard counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModerationStatsResponse {
    pub total: u64,
    pub draft: u64,
    pub pending: u64,
    pub published: u64,
    pub rejected: u64,
}

/// The caller's identity with the role resolved for this request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: String,
    pub is_admin: bool,
}

/// Stored user profile, returned after a sign-in is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub last_sign_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub uri: String,
}

/// `?status=` filter of the moderation queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminListQuery {
    pub status: Option<String>,
}

/// `?filename=` of a raw cover upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_flattens_fields() {
        let req: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "category": "Asset Management",
            "excerpt": "e",
            "content": "c",
            "status": "pending"
        }))
        .unwrap();

        assert_eq!(req.post.title, "Hello");
        assert_eq!(req.status.as_deref(), Some("pending"));
        assert!(req.post.tags.is_empty());
        assert!(req.post.cover_image.is_none());
    }

    #[test]
    fn test_list_response_counts_posts() {
        let list = PostListResponse::from(Vec::new());
        assert_eq!(list.total, 0);
    }
}
