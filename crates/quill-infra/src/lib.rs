//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the post/user stores, blob storage, the change feed
//! and session token verification.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT session tokens
//! - `rate-limit` - Rate limiting via governor

pub mod blob;
pub mod database;
pub mod pubsub;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

#[cfg(test)]
mod workflow_tests;

// Re-exports - In-Memory
pub use blob::{InMemoryBlobStore, LocalBlobStore};
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};
pub use pubsub::InMemoryPubSub;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
