use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use keystone_engine::{AuthApiError, ContentApiError, GateError, MediaApiError, RouterError};
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Invalid request. {0}")]
    ValidationError(String),
    /// Token-specific failures display as a bare "Unauthorized", so callers cannot tell which check failed.
    #[error("{0}")]
    Unauthorized(#[from] GateError),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("No route matches {0} {1}")]
    RouteNotFound(String, String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Conflict. {0}")]
    Conflict(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Could not issue access token. {0}")]
    CouldNotIssueAccessToken(String),
    #[error("Internal server error")]
    InternalFault,
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::RouteNotFound(..) => StatusCode::NOT_FOUND,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CouldNotIssueAccessToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalFault => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("💻️ Request failed with {status}. {self}");
        }
        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match e {
            AuthApiError::InvalidCredentials => Self::InvalidCredentials,
            AuthApiError::BackendError(s) => Self::BackendError(s),
        }
    }
}

impl From<ContentApiError> for ServerError {
    fn from(e: ContentApiError) -> Self {
        match e {
            ContentApiError::DatabaseError(s) => Self::BackendError(format!("Database error: {s}")),
            ContentApiError::ValidationError(s) => Self::ValidationError(s),
            ContentApiError::PostNotFound(_) => Self::NoRecordFound(e.to_string()),
            ContentApiError::SlugConflict(_) => Self::Conflict(e.to_string()),
        }
    }
}

impl From<MediaApiError> for ServerError {
    fn from(e: MediaApiError) -> Self {
        match e {
            MediaApiError::StorageError(s) => Self::BackendError(format!("Storage error: {s}")),
            MediaApiError::ValidationError(s) => Self::ValidationError(s),
            MediaApiError::ObjectNotFound(_) => Self::NoRecordFound(e.to_string()),
        }
    }
}

impl From<RouterError> for ServerError {
    fn from(e: RouterError) -> Self {
        Self::InitializeError(e.to_string())
    }
}
