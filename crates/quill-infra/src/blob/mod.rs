//! Blob storage implementations for cover images.

mod local;
mod memory;

pub use local::{LocalBlobConfig, LocalBlobStore};
pub use memory::InMemoryBlobStore;

use quill_core::ports::BlobError;

/// Reject keys that could escape the storage root.
fn check_key(key: &str) -> Result<(), BlobError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(BlobError::Invalid(format!("illegal blob key: {key}")));
    }
    Ok(())
}

/// Join a public base URL and a key with exactly one slash.
fn public_uri(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}
