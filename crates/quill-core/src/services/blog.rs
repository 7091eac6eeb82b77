//! Moderation workflow service.
//!
//! Every operation the UI layer calls goes through here: reads apply the
//! visibility rules, writes apply the state machine on [`Post`] and commit
//! with a single repository save.

use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use futures::stream::BoxStream;
use uuid::Uuid;

use super::events::{POSTS_CHANNEL, PostEvent, PostEventKind};
use crate::domain::{Post, PostInput, PostStatus, Principal, TargetStatus, can_view, composer};
use crate::error::DomainError;
use crate::ports::{BlobStore, PostOrder, PostRepository, PubSub, StatusCounts};

/// Give up on slug disambiguation after this many candidates.
const MAX_SLUG_ATTEMPTS: u32 = 100;

/// Prefix under which cover images are stored.
const COVER_PREFIX: &str = "blog-covers";

/// A cover image that has to be uploaded before the post is written.
#[derive(Debug, Clone)]
pub struct CoverUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CoverUpload {
    fn validate(&self) -> Result<(), DomainError> {
        if self.bytes.is_empty() {
            return Err(DomainError::Validation("cover image is empty".to_string()));
        }
        if !self.content_type.starts_with("image/") {
            return Err(DomainError::Validation(format!(
                "cover image must be an image, got {}",
                self.content_type
            )));
        }
        Ok(())
    }

    /// `blog-covers/{unix_millis}-{uuid}-{file name}` with the file name
    /// reduced to characters safe in a URL path. Every call yields a fresh
    /// key, so a returned URI is never overwritten by a later upload.
    fn storage_key(&self) -> String {
        let name: String = self
            .file_name
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        let name = name.trim_matches(|c| c == '-' || c == '.');
        let name = if name.is_empty() { "cover" } else { name };

        format!(
            "{COVER_PREFIX}/{}-{}-{name}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        )
    }
}

/// Blog content lifecycle and moderation.
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    blobs: Arc<dyn BlobStore>,
    events: Arc<dyn PubSub>,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        blobs: Arc<dyn BlobStore>,
        events: Arc<dyn PubSub>,
    ) -> Self {
        Self {
            posts,
            blobs,
            events,
        }
    }

    /// Public blog index: published posts, newest publication first.
    pub async fn list_published(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self
            .posts
            .list_by_status(PostStatus::Published, PostOrder::PublishedAtDesc)
            .await?)
    }

    pub async fn get_by_slug(
        &self,
        slug: &str,
        viewer: Option<&Principal>,
    ) -> Result<Post, DomainError> {
        let post = self.posts.find_by_slug(slug).await?;
        Self::visible(post, viewer)
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        viewer: Option<&Principal>,
    ) -> Result<Post, DomainError> {
        let post = self.posts.find_by_id(id).await?;
        Self::visible(post, viewer)
    }

    /// Moderation queue. `None` lists every status.
    pub async fn list_for_admin(
        &self,
        actor: &Principal,
        status: Option<PostStatus>,
    ) -> Result<Vec<Post>, DomainError> {
        Self::require_admin(actor)?;
        let posts = match status {
            Some(status) => {
                self.posts
                    .list_by_status(status, PostOrder::CreatedAtDesc)
                    .await?
            }
            None => self.posts.list_all(PostOrder::CreatedAtDesc).await?,
        };
        Ok(posts)
    }

    /// Everything the actor has written, in any status.
    pub async fn list_by_author(&self, actor: &Principal) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(&actor.uid).await?)
    }

    pub async fn moderation_stats(&self, actor: &Principal) -> Result<StatusCounts, DomainError> {
        Self::require_admin(actor)?;
        Ok(self.posts.count_by_status().await?)
    }

    pub async fn create_post(
        &self,
        input: PostInput,
        author: &Principal,
        target: TargetStatus,
        cover: Option<CoverUpload>,
    ) -> Result<Post, DomainError> {
        let mut post = Post::compose(input, author, target)?;

        post.slug = self.unique_slug(&post.slug, None).await?;
        if let Some(cover) = cover {
            post.cover_image = Some(self.store_cover(&cover).await?);
        }

        let saved = self.posts.save(post).await?;
        tracing::info!(
            post_id = %saved.id,
            slug = %saved.slug,
            status = %saved.status,
            author = %saved.author_id,
            "Post created"
        );
        self.notify(PostEventKind::Created, &saved).await;
        Ok(saved)
    }

    /// Replace the content of a post. Status is unchanged.
    pub async fn edit_post(
        &self,
        id: Uuid,
        input: PostInput,
        actor: &Principal,
        cover: Option<CoverUpload>,
    ) -> Result<Post, DomainError> {
        let mut post = self.load_for(id, actor).await?;
        post.revise(input, actor)?;

        post.slug = self.unique_slug(&post.slug, Some(post.id)).await?;
        if let Some(cover) = cover {
            post.cover_image = Some(self.store_cover(&cover).await?);
        }

        let saved = self.posts.save(post).await?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post updated");
        self.notify(PostEventKind::Updated, &saved).await;
        Ok(saved)
    }

    pub async fn submit_for_review(&self, id: Uuid, actor: &Principal) -> Result<Post, DomainError> {
        let mut post = self.load_for(id, actor).await?;
        post.submit_for_review(actor)?;
        self.commit(post, PostEventKind::Submitted).await
    }

    pub async fn approve(&self, id: Uuid, actor: &Principal) -> Result<Post, DomainError> {
        Self::require_admin(actor)?;
        let mut post = self.load_for(id, actor).await?;
        post.approve(actor)?;
        self.commit(post, PostEventKind::Approved).await
    }

    pub async fn reject(&self, id: Uuid, actor: &Principal) -> Result<Post, DomainError> {
        Self::require_admin(actor)?;
        let mut post = self.load_for(id, actor).await?;
        post.reject(actor)?;
        self.commit(post, PostEventKind::Rejected).await
    }

    /// Irreversibly remove a post. Admin only.
    pub async fn delete(&self, id: Uuid, actor: &Principal) -> Result<(), DomainError> {
        Self::require_admin(actor)?;
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(DomainError::post_not_found)?;

        self.posts.delete(id).await?;
        tracing::warn!(post_id = %id, slug = %post.slug, admin = %actor.uid, "Post deleted");
        self.notify(PostEventKind::Deleted, &post).await;
        Ok(())
    }

    /// Upload a cover image ahead of a save and return its URI.
    pub async fn upload_cover(
        &self,
        actor: &Principal,
        cover: CoverUpload,
    ) -> Result<String, DomainError> {
        let uri = self.store_cover(&cover).await?;
        tracing::debug!(uploader = %actor.uid, uri = %uri, "Cover image uploaded");
        Ok(uri)
    }

    /// Continuous change notification. Admins see every event, everyone
    /// else only events about published posts.
    pub async fn subscribe(
        &self,
        viewer: Option<&Principal>,
    ) -> Result<BoxStream<'static, PostEvent>, DomainError> {
        let is_admin = viewer.is_some_and(Principal::is_admin);
        let messages = self
            .events
            .subscribe(POSTS_CHANNEL)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let events = messages.filter_map(move |msg| async move {
            let event: PostEvent = match serde_json::from_str(&msg.payload) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping malformed post event");
                    return None;
                }
            };
            (is_admin || event.is_public()).then_some(event)
        });
        Ok(events.boxed())
    }

    fn visible(post: Option<Post>, viewer: Option<&Principal>) -> Result<Post, DomainError> {
        match post {
            Some(post) if can_view(&post, viewer) => Ok(post),
            _ => Err(DomainError::post_not_found()),
        }
    }

    fn require_admin(actor: &Principal) -> Result<(), DomainError> {
        if actor.is_admin() {
            Ok(())
        } else {
            tracing::warn!(uid = %actor.uid, "Admin operation refused");
            Err(DomainError::Unauthorized)
        }
    }

    /// Load a post the actor is allowed to see. Hidden posts are reported
    /// as missing.
    async fn load_for(&self, id: Uuid, actor: &Principal) -> Result<Post, DomainError> {
        let post = self.posts.find_by_id(id).await?;
        Self::visible(post, Some(actor))
    }

    async fn commit(&self, post: Post, kind: PostEventKind) -> Result<Post, DomainError> {
        let saved = self.posts.save(post).await?;
        tracing::info!(
            post_id = %saved.id,
            status = %saved.status,
            event = ?kind,
            "Post status changed"
        );
        self.notify(kind, &saved).await;
        Ok(saved)
    }

    async fn store_cover(&self, cover: &CoverUpload) -> Result<String, DomainError> {
        cover.validate()?;
        let key = cover.storage_key();
        self.blobs
            .upload(&key, cover.bytes.clone(), &cover.content_type)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "Cover upload failed");
                DomainError::Upload(e.to_string())
            })
    }

    /// First free slug among `base`, `base-2`, `base-3`, ... A slug held
    /// by `own` itself counts as free. Hidden posts occupy slugs too, so a
    /// suffix can hint that an unpublished post took the base slug.
    async fn unique_slug(&self, base: &str, own: Option<Uuid>) -> Result<String, DomainError> {
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let candidate = composer::disambiguate(base, attempt);
            match self.posts.find_by_slug(&candidate).await? {
                None => return Ok(candidate),
                Some(existing) if Some(existing.id) == own => return Ok(candidate),
                Some(_) => continue,
            }
        }
        Err(DomainError::Duplicate(format!(
            "no free slug for {base} after {MAX_SLUG_ATTEMPTS} attempts"
        )))
    }

    async fn notify(&self, kind: PostEventKind, post: &Post) {
        let event = PostEvent::new(kind, post);
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode post event");
                return;
            }
        };
        if let Err(e) = self.events.publish(POSTS_CHANNEL, &payload).await {
            tracing::warn!(post_id = %post.id, error = %e, "Failed to publish post event");
        }
    }
}
