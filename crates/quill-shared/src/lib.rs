//! # Quill Shared
//!
//! Wire types shared by the API server and its clients.
//! Kept free of domain logic so a WASM frontend can depend on it.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
