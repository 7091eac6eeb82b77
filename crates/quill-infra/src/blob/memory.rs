//! In-memory blob store - used when no upload directory is configured.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{BlobError, BlobStore};

struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

pub struct InMemoryBlobStore {
    base_url: String,
    blobs: RwLock<HashMap<String, StoredBlob>>,
}

impl InMemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Bytes and content type stored under `key`.
    pub async fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        let blobs = self.blobs.read().await;
        blobs
            .get(key)
            .map(|b| (b.bytes.clone(), b.content_type.clone()))
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        super::check_key(key)?;

        let mut blobs = self.blobs.write().await;
        blobs.insert(
            key.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        Ok(super::public_uri(&self.base_url, key))
    }
}
