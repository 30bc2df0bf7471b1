use keystone_engine::{
    db_types::{MediaObject, NewPost, Post, PostUpdate},
    traits::{ContentManagement, MediaStorage},
    ContentApiError,
    MediaApiError,
};
use mockall::mock;

mock! {
    pub ContentStore {}
    impl ContentManagement for ContentStore {
        async fn fetch_posts(&self) -> Result<Vec<Post>, ContentApiError>;
        async fn fetch_post(&self, id: i64) -> Result<Option<Post>, ContentApiError>;
        async fn insert_post(&self, post: NewPost) -> Result<Post, ContentApiError>;
        async fn update_post(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, ContentApiError>;
        async fn delete_post(&self, id: i64) -> Result<bool, ContentApiError>;
    }
}

mock! {
    pub MediaStore {}
    impl MediaStorage for MediaStore {
        async fn put_object(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<MediaObject, MediaApiError>;
        async fn fetch_object(&self, key: &str) -> Result<Option<(MediaObject, Vec<u8>)>, MediaApiError>;
        async fn list_objects(&self) -> Result<Vec<MediaObject>, MediaApiError>;
        async fn delete_object(&self, key: &str) -> Result<bool, MediaApiError>;
    }
}
