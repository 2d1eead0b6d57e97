use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Upload size ceiling (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Prefix of every generated storage key.
pub const UPLOAD_PREFIX: &str = "uploads";

/// A file received from a client, not yet stored.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Upload {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_size(self.data.len())?;
        check_content_type(&self.content_type)
    }

    /// Storage key for this upload at `now`.
    pub fn storage_key(&self, now: DateTime<Utc>) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        storage_key(&self.file_name, now, &suffix[..8])
    }
}

/// Reject payloads above [`MAX_UPLOAD_BYTES`].
pub fn check_size(len: usize) -> Result<(), DomainError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(DomainError::Validation(
            "File too large. Maximum size is 10MB".to_string(),
        ));
    }
    Ok(())
}

pub fn check_content_type(content_type: &str) -> Result<(), DomainError> {
    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(DomainError::Validation(
            "Invalid file type. Only images are allowed".to_string(),
        ));
    }
    Ok(())
}

/// `uploads/<millis>-<suffix>[.<ext>]`
pub fn storage_key(file_name: &str, now: DateTime<Utc>, suffix: &str) -> String {
    let base = format!("{}/{}-{}", UPLOAD_PREFIX, now.timestamp_millis(), suffix);
    match extension(file_name) {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}

fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// A stored object as read back from the media store.
#[derive(Debug, Clone)]
pub struct MediaObject {
    pub content_type: String,
    pub data: Vec<u8>,
    /// Entity tag reported by the backend, if any.
    pub etag: Option<String>,
}
