//! Deciding which requests need a token, and checking the token when they do.
//!
//! The policy is default-deny: a request is public only if its method and path match an entry that was explicitly
//! marked public. Everything else, including any route added later and paths that match no route at all, needs a
//! valid bearer token.

use log::{debug, trace};
use thiserror::Error;

use crate::{
    router::{RouteMethod, RoutePattern, RouterError},
    token::{Claims, TokenError, TokenService},
};

const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Missing Authorization header")]
    MissingAuthHeader,
    #[error("Malformed Authorization header. Expected 'Bearer <token>'")]
    MalformedAuthHeader,
    #[error("Unauthorized")]
    InvalidToken(TokenError),
}

/// The set of method and path patterns that may be called without a token.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    public: Vec<(RouteMethod, RoutePattern)>,
}

impl AccessPolicy {
    /// A policy with no public routes at all.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// The admin API policy: only `POST /login` is public.
    pub fn admin_api() -> Result<Self, RouterError> {
        Self::deny_all().allow_public(RouteMethod::Post, "/login")
    }

    pub fn allow_public(mut self, method: RouteMethod, pattern: &str) -> Result<Self, RouterError> {
        self.public.push((method, RoutePattern::parse(pattern)?));
        Ok(self)
    }

    pub fn is_public(&self, method: &str, path: &str) -> bool {
        let Ok(method) = method.parse::<RouteMethod>() else {
            return false;
        };
        self.public.iter().any(|(m, p)| *m == method && p.matches(path).is_some())
    }

    pub fn requires_token(&self, method: &str, path: &str) -> bool {
        !self.is_public(method, path)
    }

    /// Decides whether a request may proceed.
    ///
    /// Returns `Ok(None)` for public requests, `Ok(Some(claims))` for protected requests with a valid token, and an
    /// error otherwise.
    pub fn authorize(
        &self,
        tokens: &TokenService,
        method: &str,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<Option<Claims>, GateError> {
        if self.is_public(method, path) {
            trace!("🔐️ {method} {path} is public");
            return Ok(None);
        }
        let token = extract_bearer_token(authorization)?;
        let claims = tokens.validate(token).map_err(|e| {
            debug!("🔐️ Rejecting token for {method} {path}. {e}");
            GateError::InvalidToken(e)
        })?;
        Ok(Some(claims))
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value. The scheme name is matched
/// case-insensitively.
pub fn extract_bearer_token(authorization: Option<&str>) -> Result<&str, GateError> {
    let value = authorization.ok_or(GateError::MissingAuthHeader)?;
    let (scheme, token) = value.trim().split_once(' ').ok_or(GateError::MalformedAuthHeader)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(GateError::MalformedAuthHeader);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(GateError::MalformedAuthHeader);
    }
    Ok(token)
}
