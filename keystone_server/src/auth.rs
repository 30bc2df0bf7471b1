//! Session token plumbing for the server.
//!
//! Tokens are stateless: `POST /login` checks the administrator credentials and hands back a signed token carrying the
//! subject and expiry time. Every protected request presents it as `Authorization: Bearer <token>`, and the
//! [`AccessGate`](crate::middleware::AccessGateFactory) middleware validates it before the router ever sees the
//! request. Nothing about a session is stored on the server, so there is no logout; tokens simply expire.
use keystone_engine::{AuthApi, StoredCredentials, TokenService};
use log::*;

use crate::{config::AuthConfig, data_objects::LoginResponse, errors::ServerError};

/// The credential check used in production: the administrator account comes straight from configuration.
pub type AdminAuthApi = AuthApi<StoredCredentials>;

pub fn build_token_service(config: &AuthConfig) -> TokenService {
    TokenService::new(config.jwt_secret.clone(), Some(config.token_lifetime))
}

pub fn build_auth_api(config: &AuthConfig) -> AdminAuthApi {
    AuthApi::new(config.admin.clone())
}

/// Issues a fresh session token for `subject` and packages it as the login response.
pub fn issue_session(tokens: &TokenService, subject: &str) -> Result<LoginResponse, ServerError> {
    let issued = tokens.issue(subject).map_err(|e| {
        error!("🔐️ Could not sign a session token for {subject}. {e}");
        ServerError::CouldNotIssueAccessToken(e.to_string())
    })?;
    info!("🔐️ Issued session token for {subject}, valid until {}", issued.claims.expires_at);
    Ok(LoginResponse::from(issued))
}
