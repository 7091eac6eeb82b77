//! Application services - orchestrate domain rules over the ports.

mod accounts;
mod blog;
mod events;

pub use accounts::AccountService;
pub use blog::{BlogService, CoverUpload};
pub use events::{POSTS_CHANNEL, PostEvent, PostEventKind};
