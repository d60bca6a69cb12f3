//! Image storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Where portfolio images go.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Supabase project URL, e.g. `https://<project>.supabase.co`
    #[serde(default)]
    pub supabase_url: Option<String>,

    /// Service-role key used for uploads and deletes
    #[serde(default)]
    pub service_key: Option<String>,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Write to this directory instead of Supabase
    #[serde(default)]
    pub local_dir: Option<String>,

    /// URL prefix local files are served under
    #[serde(default = "default_local_prefix")]
    pub local_url_prefix: String,
}

/// Which image store to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend<'a> {
    Local { dir: &'a str, url_prefix: &'a str },
    Supabase { url: &'a str, service_key: &'a str, bucket: &'a str },
}

impl StorageConfig {
    /// A local directory wins over Supabase credentials.
    pub fn backend(&self) -> Option<StorageBackend<'_>> {
        let blank = |v: &&String| v.trim().is_empty();
        if let Some(dir) = self.local_dir.as_ref().filter(|d| !blank(d)) {
            return Some(StorageBackend::Local {
                dir,
                url_prefix: &self.local_url_prefix,
            });
        }
        match (
            self.supabase_url.as_ref().filter(|v| !blank(v)),
            self.service_key.as_ref().filter(|v| !blank(v)),
        ) {
            (Some(url), Some(service_key)) => Some(StorageBackend::Supabase {
                url,
                service_key,
                bucket: &self.bucket,
            }),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend().is_none() {
            return Err(ValidationError::NoImageStore);
        }
        if self.bucket.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__BUCKET"));
        }
        if self.max_upload_bytes == 0 {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            service_key: None,
            bucket: default_bucket(),
            max_upload_bytes: default_max_upload_bytes(),
            local_dir: None,
            local_url_prefix: default_local_prefix(),
        }
    }
}

fn default_bucket() -> String {
    "portfolio-images".to_string()
}

fn default_max_upload_bytes() -> usize {
    crate::domain::media::DEFAULT_MAX_UPLOAD_BYTES
}

fn default_local_prefix() -> String {
    "/uploads".to_string()
}
