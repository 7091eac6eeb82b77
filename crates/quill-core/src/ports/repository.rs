use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostStatus, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update). Last write wins.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Sort order for post listings. Both are newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    PublishedAtDesc,
    CreatedAtDesc,
}

/// Number of posts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub draft: u64,
    pub pending: u64,
    pub published: u64,
    pub rejected: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.draft + self.pending + self.published + self.rejected
    }

    pub fn add(&mut self, status: PostStatus, n: u64) {
        match status {
            PostStatus::Draft => self.draft += n,
            PostStatus::Pending => self.pending += n,
            PostStatus::Published => self.published += n,
            PostStatus::Rejected => self.rejected += n,
        }
    }
}

/// User repository, keyed by the authentication provider's uid.
#[async_trait]
pub trait UserRepository: BaseRepository<User, String> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Slugs are unique; a colliding save is a
/// [`RepoError::Constraint`].
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Posts in one status, filtered by the store rather than by the caller.
    async fn list_by_status(
        &self,
        status: PostStatus,
        order: PostOrder,
    ) -> Result<Vec<Post>, RepoError>;

    async fn list_all(&self, order: PostOrder) -> Result<Vec<Post>, RepoError>;

    /// All posts written by one author, newest first.
    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError>;

    async fn count_by_status(&self) -> Result<StatusCounts, RepoError>;
}
