//! # Quill Core
//!
//! The domain layer of the Quill blog service.
//! Posts, the moderation workflow, visibility and identity rules live here,
//! with zero infrastructure dependencies. Adapters implement [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
