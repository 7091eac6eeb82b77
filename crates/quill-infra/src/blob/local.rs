//! Filesystem blob store. Files land under a root directory that a reverse
//! proxy serves at `public_base_url`.

use std::path::PathBuf;

use async_trait::async_trait;

use quill_core::ports::{BlobError, BlobStore};

/// Local blob store configuration.
#[derive(Debug, Clone)]
pub struct LocalBlobConfig {
    pub root: PathBuf,
    pub public_base_url: String,
}

impl LocalBlobConfig {
    /// `UPLOAD_DIR` and `ASSET_BASE_URL`; `None` when no directory is set.
    pub fn from_env() -> Option<Self> {
        let root = std::env::var("UPLOAD_DIR").ok()?;
        Some(Self {
            root: PathBuf::from(root),
            public_base_url: std::env::var("ASSET_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080/assets".to_string()),
        })
    }
}

pub struct LocalBlobStore {
    config: LocalBlobConfig,
}

impl LocalBlobStore {
    pub fn new(config: LocalBlobConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        super::check_key(key)?;

        let path = self.config.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobError::Backend(e.to_string()))?;
        }

        // Write-then-rename: the public URI never points at a partial file.
        let tmp = path.with_extension("partial");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| BlobError::Backend(e.to_string()))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                tracing::warn!(
                    path = %tmp.display(),
                    error = %cleanup,
                    "Failed to remove partial blob"
                );
            }
            return Err(BlobError::Backend(e.to_string()));
        }

        tracing::debug!(
            key = %key,
            size = bytes.len(),
            content_type = %content_type,
            "Blob stored"
        );
        Ok(super::public_uri(&self.config.public_base_url, key))
    }
}
