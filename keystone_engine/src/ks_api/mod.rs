//! # Keystone engine public API
//!
//! Each API wraps a backend that implements the matching trait from [`crate::traits`]:
//!
//! * [`auth_api`] checks login credentials against a [`crate::traits::CredentialSource`].
//! * [`content_api`] manages posts on a [`crate::traits::ContentManagement`] backend.
//! * [`media_api`] manages binary objects on a [`crate::traits::MediaStorage`] backend.
//!
//! ```rust,ignore
//! use keystone_engine::{ContentApi, MemoryContentStore};
//! let api = ContentApi::new(MemoryContentStore::new());
//! let posts = api.posts().await?;
//! ```
pub mod auth_api;
pub mod content_api;
pub mod errors;
pub mod media_api;
