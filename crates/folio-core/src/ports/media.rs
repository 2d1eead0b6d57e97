use async_trait::async_trait;

use crate::domain::MediaObject;
use crate::error::StorageError;

/// Media store trait - abstraction over object storage backends (S3/R2, in-memory).
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store an object under `key`, recording its content type.
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<(), StorageError>;

    /// Fetch an object. Unknown keys yield `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<MediaObject>, StorageError>;

    /// Backend name for health reporting.
    fn backend(&self) -> &'static str;
}
