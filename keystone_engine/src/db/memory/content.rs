use std::{collections::BTreeMap, sync::Arc};

use chrono::Utc;
use log::trace;
use tokio::sync::RwLock;

use crate::{
    db_types::{NewPost, Post, PostUpdate},
    traits::ContentManagement,
    ContentApiError,
};

#[derive(Debug, Default)]
struct ContentState {
    last_id: i64,
    posts: BTreeMap<i64, Post>,
}

impl ContentState {
    fn slug_taken(&self, slug: &str, except: Option<i64>) -> bool {
        self.posts.values().any(|p| p.slug == slug && Some(p.id) != except)
    }
}

/// A process-local post store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    state: Arc<RwLock<ContentState>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentManagement for MemoryContentStore {
    async fn fetch_posts(&self) -> Result<Vec<Post>, ContentApiError> {
        let state = self.state.read().await;
        Ok(state.posts.values().cloned().collect())
    }

    async fn fetch_post(&self, id: i64) -> Result<Option<Post>, ContentApiError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).cloned())
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, ContentApiError> {
        let mut state = self.state.write().await;
        if state.slug_taken(&post.slug, None) {
            return Err(ContentApiError::SlugConflict(post.slug));
        }
        state.last_id += 1;
        let now = Utc::now();
        let post = Post {
            id: state.last_id,
            title: post.title,
            slug: post.slug,
            body: post.body,
            published: post.published,
            created_at: now,
            updated_at: now,
        };
        trace!("Inserted post #{} ({})", post.id, post.slug);
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, ContentApiError> {
        let mut state = self.state.write().await;
        if let Some(slug) = &update.slug {
            if state.slug_taken(slug, Some(id)) {
                return Err(ContentApiError::SlugConflict(slug.clone()));
            }
        }
        let Some(post) = state.posts.get_mut(&id) else {
            return Ok(None);
        };
        update.apply(post, Utc::now());
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, ContentApiError> {
        let mut state = self.state.write().await;
        Ok(state.posts.remove(&id).is_some())
    }
}
