use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Post, PostStatus};

/// Channel carrying every committed post mutation.
pub const POSTS_CHANNEL: &str = "posts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostEventKind {
    Created,
    Updated,
    Submitted,
    Approved,
    Rejected,
    Deleted,
}

/// Change notification for one post.
///
/// For `Deleted`, `status` is the status the post had when it was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEvent {
    pub kind: PostEventKind,
    pub post_id: Uuid,
    pub slug: String,
    pub status: PostStatus,
}

impl PostEvent {
    pub fn new(kind: PostEventKind, post: &Post) -> Self {
        Self {
            kind,
            post_id: post.id,
            slug: post.slug.clone(),
            status: post.status,
        }
    }

    /// Anonymous readers only hear about published posts.
    pub fn is_public(&self) -> bool {
        self.status == PostStatus::Published
    }
}
