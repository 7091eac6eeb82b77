//! Domain entities and the pure rules around them.

pub mod composer;
mod identity;
mod post;
mod user;
mod visibility;

pub use identity::AdminAllowList;
pub use post::{Category, Post, PostInput, PostStatus, TargetStatus};
pub use user::{Principal, Role, User, VerifiedIdentity};
pub use visibility::can_view;
