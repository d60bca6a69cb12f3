//! Media module - image uploads destined for the object store.
//!
//! Uploads are checked here before any storage call is made: the declared
//! MIME type must be one of the supported image formats and the payload must
//! fit under the configured size cap.

use serde::Serialize;
use uuid::Uuid;

use super::foundation::{UserId, ValidationError};

/// Default upload cap (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageType {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageType::Jpeg),
            "image/png" => Some(ImageType::Png),
            "image/webp" => Some(ImageType::Webp),
            "image/gif" => Some(ImageType::Gif),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::Webp => "image/webp",
            ImageType::Gif => "image/gif",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "jpg",
            ImageType::Png => "png",
            ImageType::Webp => "webp",
            ImageType::Gif => "gif",
        }
    }
}

/// An image accepted for upload, with the key it will be stored under.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub image_type: ImageType,
    pub object_key: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Checks type and size, then assigns `{owner}/{uuid}.{ext}` as the key.
    pub fn new(
        owner: &UserId,
        content_type: Option<&str>,
        bytes: Vec<u8>,
        max_bytes: usize,
    ) -> Result<Self, ValidationError> {
        if bytes.is_empty() {
            return Err(ValidationError::empty_field("file"));
        }
        if bytes.len() > max_bytes {
            return Err(ValidationError::out_of_range(
                "file",
                1,
                max_bytes as i64,
                bytes.len() as i64,
            ));
        }
        let image_type = content_type
            .and_then(ImageType::from_mime)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "file",
                    "only JPEG, PNG, WebP and GIF images are allowed",
                )
            })?;

        Ok(Self {
            image_type,
            object_key: object_key(owner, Uuid::new_v4(), image_type),
            bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Builds an object key scoped to the owner's folder.
pub fn object_key(owner: &UserId, id: Uuid, image_type: ImageType) -> String {
    format!("{}/{}.{}", folder_for(owner), id, image_type.extension())
}

/// Folder name derived from an email: anything outside `[a-z0-9._-]` becomes `_`.
pub fn folder_for(owner: &UserId) -> String {
    owner
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// True when `path` sits directly under the owner's folder.
pub fn is_owned_path(owner: &UserId, path: &str) -> bool {
    let folder = folder_for(owner);
    match path.strip_prefix(folder.as_str()).and_then(|rest| rest.strip_prefix('/')) {
        Some(name) => !name.is_empty() && !name.contains('/') && name != "..",
        None => false,
    }
}

/// Location of a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredImage {
    pub url: String,
    pub path: String,
}
