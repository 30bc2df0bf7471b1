//! Data types exchanged with the content and media backends.
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LENGTH: usize = 200;
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

fn slug_pattern() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is a valid regex"))
}

fn media_key_pattern() -> &'static Regex {
    static KEY: OnceLock<Regex> = OnceLock::new();
    KEY.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("media key pattern is a valid regex"))
}

//--------------------------------------        Posts        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

impl NewPost {
    pub fn new(title: &str, slug: &str, body: &str) -> Self {
        Self { title: title.to_string(), slug: slug.to_string(), body: body.to_string(), published: false }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)?;
        validate_slug(&self.slug)
    }
}

/// A partial update. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.body.is_none() && self.published.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("The update does not change any field".into());
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        Ok(())
    }

    /// Applies the update to `post`, stamping `updated_at` with `now`.
    pub fn apply(self, post: &mut Post, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
        post.updated_at = now;
    }
}

pub fn validate_title(title: &str) -> Result<(), String> {
    let len = title.trim().chars().count();
    if len == 0 {
        Err("Title must not be empty".into())
    } else if len > MAX_TITLE_LENGTH {
        Err(format!("Title must be at most {MAX_TITLE_LENGTH} characters"))
    } else {
        Ok(())
    }
}

pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug_pattern().is_match(slug) {
        Ok(())
    } else {
        Err(format!("Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"))
    }
}

//--------------------------------------        Media        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaObject {
    pub key: String,
    pub content_type: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

pub fn validate_media_key(key: &str) -> Result<(), String> {
    if media_key_pattern().is_match(key) && key != "." && key != ".." {
        Ok(())
    } else {
        Err(format!("Invalid media key '{key}'. Use letters, digits, '.', '-' and '_'"))
    }
}
