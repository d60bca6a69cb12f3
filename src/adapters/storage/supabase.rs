//! Supabase Storage bucket adapter.
//!
//! Uploads go to `POST {url}/storage/v1/object/{bucket}/{path}` with the
//! service role key; objects are served from the public bucket URL
//! `{url}/storage/v1/object/public/{bucket}/{path}`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::media::{ImageUpload, StoredImage};
use crate::ports::{ImageStore, StorageError};

#[derive(Debug, Clone)]
pub struct SupabaseStorageConfig {
    pub project_url: String,
    service_key: Secret<String>,
    pub bucket: String,
    pub timeout: Duration,
}

impl SupabaseStorageConfig {
    pub fn new(
        project_url: impl Into<String>,
        service_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            project_url: project_url.into().trim_end_matches('/').to_string(),
            service_key: Secret::new(service_key.into()),
            bucket: bucket.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.project_url, self.bucket, path
        )
    }

    fn public_prefix(&self) -> String {
        format!(
            "{}/storage/v1/object/public/{}/",
            self.project_url, self.bucket
        )
    }
}

pub struct SupabaseImageStore {
    config: SupabaseStorageConfig,
    client: Client,
}

impl SupabaseImageStore {
    pub fn new(config: SupabaseStorageConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}{}", self.config.public_prefix(), path)
    }

    async fn check(response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ImageStore for SupabaseImageStore {
    async fn put(&self, upload: &ImageUpload) -> Result<StoredImage, StorageError> {
        let response = self
            .client
            .post(self.config.object_url(&upload.object_key))
            .bearer_auth(self.config.service_key.expose_secret())
            .header("apikey", self.config.service_key.expose_secret())
            .header("Content-Type", upload.image_type.mime())
            .header("x-upsert", "false")
            .body(upload.bytes.clone())
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Self::check(response).await?;

        tracing::debug!(path = %upload.object_key, bytes = upload.size(), "uploaded image");
        Ok(StoredImage {
            url: self.public_url(&upload.object_key),
            path: upload.object_key.clone(),
        })
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(self.config.object_url(path))
            .bearer_auth(self.config.service_key.expose_secret())
            .header("apikey", self.config.service_key.expose_secret())
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(response).await.map(|_| ())
    }

    fn path_for_url(&self, url: &str) -> Option<String> {
        let prefix = self.config.public_prefix();
        url.strip_prefix(prefix.as_str())
            .map(|p| p.split(['?', '#']).next().unwrap_or(p))
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SupabaseImageStore {
        SupabaseImageStore::new(SupabaseStorageConfig::new(
            "https://proj.supabase.co/",
            "service-key",
            "portfolio-images",
        ))
        .unwrap()
    }

    #[test]
    fn builds_object_and_public_urls() {
        let store = store();
        assert_eq!(
            store.config.object_url("a/b.png"),
            "https://proj.supabase.co/storage/v1/object/portfolio-images/a/b.png"
        );
        assert_eq!(
            store.public_url("a/b.png"),
            "https://proj.supabase.co/storage/v1/object/public/portfolio-images/a/b.png"
        );
    }

    #[test]
    fn recognizes_only_own_bucket_urls() {
        let store = store();
        assert_eq!(
            store
                .path_for_url(
                    "https://proj.supabase.co/storage/v1/object/public/portfolio-images/a/b.png?t=1"
                )
                .as_deref(),
            Some("a/b.png")
        );
        assert!(store
            .path_for_url("https://proj.supabase.co/storage/v1/object/public/other/a/b.png")
            .is_none());
        assert!(store.path_for_url("https://cdn.example.com/a/b.png").is_none());
    }
}
