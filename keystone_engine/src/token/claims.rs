use serde::{Deserialize, Serialize};

use super::signer::ALGORITHM;

/// Token lifetime used whenever the configured or requested lifetime is missing or not positive.
pub const DEFAULT_TOKEN_LIFETIME: i64 = 7200;

/// The fields carried in a token payload. Times are seconds since the Unix epoch.
///
/// The payload is signed but not encrypted, so nothing secret may be placed in here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "sub")]
    pub subject: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    pub fn new(subject: &str, issued_at: i64, lifetime: Option<i64>) -> Self {
        let lifetime = effective_lifetime(lifetime);
        Self { subject: subject.to_string(), issued_at, expires_at: issued_at.saturating_add(lifetime) }
    }

    pub fn lifetime(&self) -> i64 {
        self.expires_at - self.issued_at
    }

    /// A token is expired from the second named in `exp` onwards.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn is_well_formed(&self) -> bool {
        self.expires_at > self.issued_at && !self.subject.is_empty()
    }
}

pub fn effective_lifetime(lifetime: Option<i64>) -> i64 {
    match lifetime {
        Some(l) if l > 0 => l,
        _ => DEFAULT_TOKEN_LIFETIME,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self { alg: ALGORITHM.to_string(), typ: "JWT".to_string() }
    }
}
