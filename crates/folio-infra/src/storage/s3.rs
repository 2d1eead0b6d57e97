//! S3 media store.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;

use folio_core::domain::MediaObject;
use folio_core::error::StorageError;
use folio_core::ports::MediaStore;

/// Bucket configuration.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    /// Custom endpoint, e.g. `https://<account>.r2.cloudflarestorage.com`.
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Media store writing to a single bucket.
pub struct S3MediaStore {
    client: Client,
    bucket: String,
}

impl S3MediaStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from configuration. Static keys win over the ambient
    /// AWS credential chain when both are given.
    pub async fn connect(config: &S3Config) -> Self {
        let mut loader =
            aws_config::from_env().region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "folio-env",
            ));
        }

        let sdk_config = loader.load().await;
        tracing::info!(bucket = %config.bucket, "Media bucket configured");

        Self::new(Client::new(&sdk_config), config.bucket.clone())
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.into_service_error().to_string()))?;

        tracing::debug!(key = %key, "Object stored");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<MediaObject>, StorageError> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let err = err.into_service_error();
                if err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(StorageError::Backend(err.to_string()));
            }
        };

        let content_type = output
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let etag = output.e_tag().map(str::to_string);

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Body(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(Some(MediaObject {
            content_type,
            data,
            etag,
        }))
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}
