use std::{collections::BTreeMap, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{db_types::MediaObject, traits::MediaStorage, MediaApiError};

/// A process-local object store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryMediaStore {
    objects: Arc<RwLock<BTreeMap<String, (MediaObject, Vec<u8>)>>>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaStorage for MemoryMediaStore {
    async fn put_object(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<MediaObject, MediaApiError> {
        let object = MediaObject {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: data.len() as u64,
            uploaded_at: Utc::now(),
        };
        self.objects.write().await.insert(key.to_string(), (object.clone(), data));
        Ok(object)
    }

    async fn fetch_object(&self, key: &str) -> Result<Option<(MediaObject, Vec<u8>)>, MediaApiError> {
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn list_objects(&self) -> Result<Vec<MediaObject>, MediaApiError> {
        Ok(self.objects.read().await.values().map(|(o, _)| o.clone()).collect())
    }

    async fn delete_object(&self, key: &str) -> Result<bool, MediaApiError> {
        Ok(self.objects.write().await.remove(key).is_some())
    }
}
