//! In-memory image store for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::media::{ImageUpload, StoredImage};
use crate::ports::{ImageStore, StorageError};

const PUBLIC_PREFIX: &str = "https://storage.test/images/";

#[derive(Debug, Default)]
pub struct InMemoryImageStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects
            .read()
            .map(|o| o.contains_key(path))
            .unwrap_or(false)
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn url_for(path: &str) -> String {
        format!("{}{}", PUBLIC_PREFIX, path)
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn put(&self, upload: &ImageUpload) -> Result<StoredImage, StorageError> {
        self.objects
            .write()
            .map_err(|_| StorageError::Io("image store lock poisoned".into()))?
            .insert(upload.object_key.clone(), upload.bytes.clone());
        Ok(StoredImage {
            url: Self::url_for(&upload.object_key),
            path: upload.object_key.clone(),
        })
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.objects
            .write()
            .map_err(|_| StorageError::Io("image store lock poisoned".into()))?
            .remove(path);
        Ok(())
    }

    fn path_for_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(PUBLIC_PREFIX)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }
}
