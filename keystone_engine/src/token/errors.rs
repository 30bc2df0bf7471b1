use thiserror::Error;

use super::{codec::DecodeError, signer::SignerError};

/// Reasons a token cannot be issued or accepted.
///
/// The variants exist for logging and tests. Callers at the HTTP boundary must collapse all of them into one
/// "unauthorized" response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed. {0}")]
    Malformed(String),
    #[error("Token signature is invalid.")]
    InvalidSignature,
    #[error("Token expired at {0}.")]
    Expired(i64),
    #[error("Could not sign token. {0}")]
    Signing(#[from] SignerError),
}

impl From<DecodeError> for TokenError {
    fn from(e: DecodeError) -> Self {
        Self::Malformed(e.to_string())
    }
}

impl TokenError {
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}
