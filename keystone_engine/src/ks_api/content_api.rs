use std::fmt::Debug;

use log::{debug, trace};

use crate::{
    db_types::{NewPost, Post, PostUpdate},
    traits::ContentManagement,
    ContentApiError,
};

/// The `ContentApi` validates post input and turns "no such post" answers from the backend into errors.
pub struct ContentApi<B> {
    db: B,
}

impl<B: Debug> Debug for ContentApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentApi ({:?})", self.db)
    }
}

impl<B> ContentApi<B>
where B: ContentManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn posts(&self) -> Result<Vec<Post>, ContentApiError> {
        self.db.fetch_posts().await
    }

    pub async fn post(&self, id: i64) -> Result<Post, ContentApiError> {
        self.db.fetch_post(id).await?.ok_or(ContentApiError::PostNotFound(id))
    }

    pub async fn create_post(&self, post: NewPost) -> Result<Post, ContentApiError> {
        post.validate().map_err(ContentApiError::ValidationError)?;
        let post = self.db.insert_post(post).await?;
        debug!("Created post #{} ({})", post.id, post.slug);
        Ok(post)
    }

    pub async fn update_post(&self, id: i64, update: PostUpdate) -> Result<Post, ContentApiError> {
        update.validate().map_err(ContentApiError::ValidationError)?;
        let post = self.db.update_post(id, update).await?.ok_or(ContentApiError::PostNotFound(id))?;
        trace!("Updated post #{id}");
        Ok(post)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ContentApiError> {
        if self.db.delete_post(id).await? {
            debug!("Deleted post #{id}");
            Ok(())
        } else {
            Err(ContentApiError::PostNotFound(id))
        }
    }
}
