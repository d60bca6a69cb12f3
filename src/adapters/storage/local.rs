//! Filesystem image store for local development.
//!
//! Objects are written below a base directory and addressed by a public URL
//! prefix, mirroring how the bucket store serves them.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::domain::media::{ImageUpload, StoredImage};
use crate::ports::{ImageStore, StorageError};

#[derive(Debug, Clone)]
pub struct LocalImageStore {
    base_path: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    /// ```ignore
    /// let store = LocalImageStore::new("./data/uploads", "/uploads");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, public_prefix: impl Into<String>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolves an object key below the base directory, refusing traversal.
    fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || key.is_empty() {
            return Err(StorageError::Io(format!("invalid object key '{}'", key)));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, upload: &ImageUpload) -> Result<StoredImage, StorageError> {
        let path = self.object_path(&upload.object_key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }
        fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(StoredImage {
            url: format!("{}/{}", self.public_prefix, upload.object_key),
            path: upload.object_key.clone(),
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.object_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    fn path_for_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.public_prefix)?
            .strip_prefix('/')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use tempfile::TempDir;

    fn upload() -> ImageUpload {
        let owner = UserId::new("jane@example.com").unwrap();
        ImageUpload::new(&owner, Some("image/png"), vec![1, 2, 3], 1024).unwrap()
    }

    #[tokio::test]
    async fn put_writes_file_and_returns_public_url() {
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads/");
        let upload = upload();

        let stored = store.put(&upload).await.unwrap();

        assert_eq!(stored.path, upload.object_key);
        assert_eq!(stored.url, format!("/uploads/{}", upload.object_key));
        let on_disk = std::fs::read(dir.path().join(&upload.object_key)).unwrap();
        assert_eq!(on_disk, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads");
        let stored = store.put(&upload()).await.unwrap();

        store.remove(&stored.path).await.unwrap();
        assert!(!dir.path().join(&stored.path).exists());
        store.remove(&stored.path).await.unwrap();
    }

    #[tokio::test]
    async fn traversal_keys_are_refused() {
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads");
        assert!(store.remove("../etc/passwd").await.is_err());
        assert!(store.remove("/abs").await.is_err());
    }

    #[test]
    fn maps_urls_back_to_paths() {
        let store = LocalImageStore::new("/tmp/x", "/uploads");
        assert_eq!(
            store.path_for_url("/uploads/jane_example.com/a.png").as_deref(),
            Some("jane_example.com/a.png")
        );
        assert!(store.path_for_url("https://elsewhere.com/a.png").is_none());
        assert!(store.path_for_url("/uploads/").is_none());
    }
}
