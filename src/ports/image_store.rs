//! Object storage for uploaded images.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::media::{ImageUpload, StoredImage};

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage request failed: {0}")]
    Request(String),

    #[error("Storage rejected the object ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the image under its object key and returns its public location.
    async fn put(&self, upload: &ImageUpload) -> Result<StoredImage, StorageError>;

    /// Removes an object. Missing objects are not an error.
    async fn remove(&self, path: &str) -> Result<(), StorageError>;

    /// Object path for a public URL served by this store, if it is one.
    fn path_for_url(&self, url: &str) -> Option<String>;
}
