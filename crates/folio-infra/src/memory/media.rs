//! In-memory media store - used when no bucket is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::domain::MediaObject;
use folio_core::error::StorageError;
use folio_core::ports::MediaStore;

struct StoredObject {
    content_type: String,
    data: Vec<u8>,
}

/// Object map held in process memory. Data is lost on process restart.
pub struct InMemoryMediaStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<(), StorageError> {
        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                data,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<MediaObject>, StorageError> {
        let objects = self.objects.read().await;
        Ok(objects.get(key).map(|obj| MediaObject {
            content_type: obj.content_type.clone(),
            data: obj.data.clone(),
            etag: None,
        }))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
