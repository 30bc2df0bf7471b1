use std::fmt::Debug;

use log::debug;

use crate::{
    db_types::{validate_media_key, MediaObject, DEFAULT_CONTENT_TYPE},
    traits::MediaStorage,
    MediaApiError,
};

pub struct MediaApi<M> {
    storage: M,
}

impl<M: Debug> Debug for MediaApi<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MediaApi ({:?})", self.storage)
    }
}

impl<M> MediaApi<M>
where M: MediaStorage
{
    pub fn new(storage: M) -> Self {
        Self { storage }
    }

    /// Stores an upload. Empty bodies and keys outside `[A-Za-z0-9._-]` are rejected. A missing or blank content type
    /// is stored as `application/octet-stream`.
    pub async fn upload(
        &self,
        key: &str,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> Result<MediaObject, MediaApiError> {
        validate_media_key(key).map_err(MediaApiError::ValidationError)?;
        if data.is_empty() {
            return Err(MediaApiError::ValidationError("Uploads must not be empty".into()));
        }
        let content_type = content_type.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_CONTENT_TYPE);
        let object = self.storage.put_object(key, content_type, data).await?;
        debug!("Stored media object {} ({} bytes)", object.key, object.size);
        Ok(object)
    }

    pub async fn download(&self, key: &str) -> Result<(MediaObject, Vec<u8>), MediaApiError> {
        validate_media_key(key).map_err(MediaApiError::ValidationError)?;
        self.storage.fetch_object(key).await?.ok_or_else(|| MediaApiError::ObjectNotFound(key.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<MediaObject>, MediaApiError> {
        self.storage.list_objects().await
    }

    pub async fn delete(&self, key: &str) -> Result<(), MediaApiError> {
        validate_media_key(key).map_err(MediaApiError::ValidationError)?;
        if self.storage.delete_object(key).await? {
            debug!("Deleted media object {key}");
            Ok(())
        } else {
            Err(MediaApiError::ObjectNotFound(key.to_string()))
        }
    }
}
