//! Blob storage port - cover image uploads.

use async_trait::async_trait;

/// Blob store trait - accepts bytes and hands back a stable URI.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URI.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str)
    -> Result<String, BlobError>;
}

/// Blob storage errors.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Invalid blob: {0}")]
    Invalid(String),

    #[error("Blob backend error: {0}")]
    Backend(String),
}
