//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod blob;
mod pubsub;
mod rate_limit;
mod repository;

pub use auth::{AuthError, SessionClaims, TokenService};
pub use blob::{BlobError, BlobStore};
pub use pubsub::{PubSub, PubSubError, PubSubMessage, Subscription};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, PostOrder, PostRepository, StatusCounts, UserRepository};
