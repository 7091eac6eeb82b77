//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::domain::AdminAllowList;
use quill_core::ports::{
    BlobStore, PostRepository, PubSub, RateLimiter, TokenService, UserRepository,
};
use quill_core::services::{AccountService, BlogService};
use quill_infra::{
    InMemoryBlobStore, InMemoryPostRepository, InMemoryPubSub, InMemoryUserRepository,
    JwtTokenService, LocalBlobStore,
};

#[cfg(feature = "postgres")]
use quill_infra::database::{PostgresPostRepository, PostgresUserRepository, connect};

#[cfg(feature = "rate-limit")]
use quill_infra::InMemoryRateLimiter;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
    pub accounts: Arc<AccountService>,
    pub admins: Arc<AdminAllowList>,
    pub tokens: Arc<dyn TokenService>,
    /// `None` when built without the `rate-limit` feature.
    pub limiter: Option<Arc<dyn RateLimiter>>,
    /// Which post store is live, reported by the health check.
    pub storage: &'static str,
}

type Stores = (Arc<dyn PostRepository>, Arc<dyn UserRepository>, &'static str);

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (posts, users, storage) = Self::stores(config).await;

        let blobs: Arc<dyn BlobStore> = match &config.uploads {
            Some(uploads) => {
                tracing::info!(root = %uploads.root.display(), "Storing cover images on disk");
                Arc::new(LocalBlobStore::new(uploads.clone()))
            }
            None => {
                tracing::warn!("UPLOAD_DIR not set. Cover images are kept in memory.");
                Arc::new(InMemoryBlobStore::new(config.asset_base_url.clone()))
            }
        };

        let state = Self::assemble(
            posts,
            users,
            blobs,
            config.admins.clone(),
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            storage,
            Self::limiter(config),
        );

        tracing::info!(storage, "Application state initialized");
        state
    }

    /// Everything in memory, no rate limiting.
    #[cfg(test)]
    pub fn in_memory(admins: AdminAllowList, tokens: Arc<dyn TokenService>) -> Self {
        Self::assemble(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryBlobStore::new("http://127.0.0.1:8080/assets")),
            admins,
            tokens,
            "memory",
            None,
        )
    }

    #[cfg(test)]
    pub fn with_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    fn assemble(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        blobs: Arc<dyn BlobStore>,
        admins: AdminAllowList,
        tokens: Arc<dyn TokenService>,
        storage: &'static str,
        limiter: Option<Arc<dyn RateLimiter>>,
    ) -> Self {
        let events: Arc<dyn PubSub> = Arc::new(InMemoryPubSub::default());

        Self {
            blog: Arc::new(BlogService::new(posts, blobs, events)),
            accounts: Arc::new(AccountService::new(users)),
            admins: Arc::new(admins),
            tokens,
            limiter,
            storage,
        }
    }

    #[cfg(feature = "rate-limit")]
    fn limiter(config: &AppConfig) -> Option<Arc<dyn RateLimiter>> {
        Some(Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())))
    }

    #[cfg(not(feature = "rate-limit"))]
    fn limiter(_config: &AppConfig) -> Option<Arc<dyn RateLimiter>> {
        None
    }

    #[cfg(feature = "postgres")]
    async fn stores(config: &AppConfig) -> Stores {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::memory_stores();
        };

        match connect(db_config).await {
            Ok(conn) => (
                Arc::new(PostgresPostRepository::new(conn.clone())),
                Arc::new(PostgresUserRepository::new(conn)),
                "postgres",
            ),
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
                Self::memory_stores()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn stores(config: &AppConfig) -> Stores {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        Self::memory_stores()
    }

    fn memory_stores() -> Stores {
        (
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            "memory",
        )
    }
}
