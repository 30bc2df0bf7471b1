//! # Backend contracts
//!
//! The traits in this module are what a storage backend implements to serve the admin API. The API wrappers in
//! [`crate::ks_api`] hold a backend and add validation and error mapping on top.
//!
//! * [`CredentialSource`] supplies the expected administrator username, password hash and salt.
//! * [`ContentManagement`] stores posts.
//! * [`MediaStorage`] stores binary objects.
mod content_management;
mod credential_source;
mod media_storage;

pub use content_management::ContentManagement;
pub use credential_source::CredentialSource;
pub use media_storage::MediaStorage;
