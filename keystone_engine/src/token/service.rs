//! Issuing and validating signed session tokens.
//!
//! A token is `base64url(header).base64url(claims).base64url(hmac)`, where the MAC covers the first two encoded
//! segments joined by a `.`. Tokens are stateless: nothing is recorded on issue, so a token stays valid until its
//! `exp` claim passes.

use chrono::Utc;
use keystone_common::Secret;
use log::{debug, trace};

use super::{
    claims::{effective_lifetime, Claims, TokenHeader},
    codec::{self, TokenParts},
    errors::TokenError,
    signer::{self, ALGORITHM},
};

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

pub fn issue_token(subject: &str, lifetime: Option<i64>, secret_key: &[u8]) -> Result<IssuedToken, TokenError> {
    issue_token_at(subject, lifetime, secret_key, unix_now())
}

/// Issues a token as if the current time were `now`.
pub fn issue_token_at(
    subject: &str,
    lifetime: Option<i64>,
    secret_key: &[u8],
    now: i64,
) -> Result<IssuedToken, TokenError> {
    let claims = Claims::new(subject, now, lifetime);
    let header = serde_json::to_string(&TokenHeader::default()).map_err(|e| TokenError::Malformed(e.to_string()))?;
    let payload = serde_json::to_string(&claims).map_err(|e| TokenError::Malformed(e.to_string()))?;
    let header = codec::encode_str(&header);
    let payload = codec::encode_str(&payload);
    let signature = signer::sign_encoded(&codec::signing_input(&header, &payload), secret_key)?;
    let token = codec::join(&header, &payload, &signature);
    trace!("🔐️ Issued token for {} expiring at {}", claims.subject, claims.expires_at);
    Ok(IssuedToken { token, claims })
}

pub fn validate_token(token: &str, secret_key: &[u8]) -> Result<Claims, TokenError> {
    validate_token_at(token, secret_key, unix_now())
}

/// Validates a token as if the current time were `now`.
///
/// Checks run in a fixed order: shape, signature, header and payload contents, and finally expiry. Nothing from the
/// header or payload is trusted before the signature has been verified.
pub fn validate_token_at(token: &str, secret_key: &[u8], now: i64) -> Result<Claims, TokenError> {
    let parts = TokenParts::split(token)
        .ok_or_else(|| TokenError::Malformed("A token must have exactly three non-empty segments".into()))?;
    if !signer::verify_encoded(&parts.signing_input(), parts.signature, secret_key) {
        debug!("🔐️ Token signature verification failed");
        return Err(TokenError::InvalidSignature);
    }
    let header = codec::decode_str(parts.header)?;
    let header = serde_json::from_str::<TokenHeader>(&header)
        .map_err(|e| TokenError::Malformed(format!("Invalid token header. {e}")))?;
    if header.alg != ALGORITHM {
        return Err(TokenError::Malformed(format!("Unsupported signing algorithm: {}", header.alg)));
    }
    let payload = codec::decode_str(parts.payload)?;
    let claims = serde_json::from_str::<Claims>(&payload)
        .map_err(|e| TokenError::Malformed(format!("Invalid token claims. {e}")))?;
    if !claims.is_well_formed() {
        return Err(TokenError::Malformed("Token claims are inconsistent".into()));
    }
    if claims.is_expired_at(now) {
        debug!("🔐️ Token for {} expired at {}", claims.subject, claims.expires_at);
        return Err(TokenError::Expired(claims.expires_at));
    }
    Ok(claims)
}

/// Issues and validates tokens with a fixed key and lifetime, both taken from configuration at start-up.
#[derive(Clone, Debug)]
pub struct TokenService {
    secret_key: Secret<Vec<u8>>,
    lifetime: i64,
}

impl TokenService {
    pub fn new(secret_key: Secret<Vec<u8>>, lifetime: Option<i64>) -> Self {
        Self { secret_key, lifetime: effective_lifetime(lifetime) }
    }

    pub fn lifetime(&self) -> i64 {
        self.lifetime
    }

    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        issue_token(subject, Some(self.lifetime), self.secret_key.reveal())
    }

    pub fn issue_at(&self, subject: &str, now: i64) -> Result<IssuedToken, TokenError> {
        issue_token_at(subject, Some(self.lifetime), self.secret_key.reveal(), now)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        validate_token(token, self.secret_key.reveal())
    }

    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        validate_token_at(token, self.secret_key.reveal(), now)
    }
}
