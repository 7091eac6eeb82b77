//! In-memory repositories - used when no database is configured.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, PostOrder, PostRepository, StatusCounts, UserRepository,
};

fn sort_posts(posts: &mut [Post], order: PostOrder) {
    match order {
        PostOrder::PublishedAtDesc => posts.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then(b.created_at.cmp(&a.created_at))
        }),
        PostOrder::CreatedAtDesc => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Post store on a `HashMap` behind an async `RwLock`. Enforces slug
/// uniqueness like the database's unique index.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect<F>(&self, order: PostOrder, keep: F) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
    {
        let posts = self.posts.read().await;
        let mut out: Vec<Post> = posts.values().filter(|p| keep(p)).cloned().collect();
        sort_posts(&mut out, order);
        out
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        let taken = posts
            .values()
            .any(|other| other.slug == post.slug && other.id != post.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "slug {} already exists",
                post.slug
            )));
        }

        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.posts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_by_status(
        &self,
        status: PostStatus,
        order: PostOrder,
    ) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(order, |p| p.status == status).await)
    }

    async fn list_all(&self, order: PostOrder) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(order, |_| true).await)
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .collect(PostOrder::CreatedAtDesc, |p| p.author_id == author_id)
            .await)
    }

    async fn count_by_status(&self) -> Result<StatusCounts, RepoError> {
        let posts = self.posts.read().await;
        let mut counts = StatusCounts::default();
        for post in posts.values() {
            counts.add(post.status, 1);
        }
        Ok(counts)
    }
}

/// User store keyed by provider uid.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, String> for InMemoryUserRepository {
    async fn find_by_id(&self, uid: String) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&uid).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.users
            .write()
            .await
            .insert(user.uid.clone(), user.clone());
        Ok(user)
    }

    async fn delete(&self, uid: String) -> Result<(), RepoError> {
        match self.users.write().await.remove(&uid) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}
