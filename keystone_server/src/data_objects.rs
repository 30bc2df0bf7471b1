//! Request and response bodies for the admin API that are not plain engine types.
use keystone_engine::{Claims, IssuedToken};
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

/// The body of `POST /login`. Both fields are optional at the serde level so that a missing field is reported as a
/// validation error rather than a generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(username: &str, password: &str) -> Self {
        Self { username: Some(username.to_string()), password: Some(password.to_string()) }
    }

    /// Returns `(username, password)`, or a 400 error if either is missing or empty.
    pub fn into_credentials(self) -> Result<(String, String), ServerError> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
            _ => Err(ServerError::ValidationError("Both username and password are required".into())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self { expires_in: issued.claims.lifetime(), token: issued.token }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub valid: bool,
    pub subject_id: String,
    pub expires_at: i64,
}

impl From<&Claims> for SessionResponse {
    fn from(claims: &Claims) -> Self {
        Self { valid: true, subject_id: claims.subject.clone(), expires_at: claims.expires_at }
    }
}
