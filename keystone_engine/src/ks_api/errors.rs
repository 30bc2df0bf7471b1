use thiserror::Error;

use crate::credentials::CredentialError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthApiError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Credential store error: {0}")]
    BackendError(String),
}

impl From<CredentialError> for AuthApiError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::InvalidCredentials => Self::InvalidCredentials,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Invalid post. {0}")]
    ValidationError(String),
    #[error("Post {0} does not exist")]
    PostNotFound(i64),
    #[error("A post with slug '{0}' already exists")]
    SlugConflict(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaApiError {
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Invalid upload. {0}")]
    ValidationError(String),
    #[error("Media object '{0}' does not exist")]
    ObjectNotFound(String),
}
