use crate::{
    db_types::{NewPost, Post, PostUpdate},
    ContentApiError,
};

/// The `ContentManagement` trait defines the storage behaviour that backs the `/admin/posts` routes.
///
/// Input is validated by [`crate::ContentApi`] before it reaches the backend, so implementations only need to enforce
/// what the store itself guarantees: id assignment and slug uniqueness.
#[allow(async_fn_in_trait)]
pub trait ContentManagement {
    /// Fetches all posts, ordered by id.
    async fn fetch_posts(&self) -> Result<Vec<Post>, ContentApiError>;
    async fn fetch_post(&self, id: i64) -> Result<Option<Post>, ContentApiError>;
    /// Stores a new post and returns it with its assigned id and timestamps. If another post already uses the slug,
    /// [`ContentApiError::SlugConflict`] is returned.
    async fn insert_post(&self, post: NewPost) -> Result<Post, ContentApiError>;
    /// Applies `update` to the post with the given id. Returns `None` if there is no such post.
    async fn update_post(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, ContentApiError>;
    /// Deletes the post. Returns `false` if there was no such post.
    async fn delete_post(&self, id: i64) -> Result<bool, ContentApiError>;
}
