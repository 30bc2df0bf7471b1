use crate::{db_types::MediaObject, MediaApiError};

/// Binary object storage behind the `/admin/media` routes. Keys are validated before they reach the backend.
#[allow(async_fn_in_trait)]
pub trait MediaStorage {
    /// Stores `data` under `key`, replacing any existing object.
    async fn put_object(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<MediaObject, MediaApiError>;
    async fn fetch_object(&self, key: &str) -> Result<Option<(MediaObject, Vec<u8>)>, MediaApiError>;
    /// Lists object metadata, sorted by key.
    async fn list_objects(&self) -> Result<Vec<MediaObject>, MediaApiError>;
    /// Deletes the object. Returns `false` if nothing was stored under `key`.
    async fn delete_object(&self, key: &str) -> Result<bool, MediaApiError>;
}
