//! Checking the administrator's username and password.
//!
//! There is exactly one account. Its password is never stored or compared in plaintext: the expected value is
//! `hex(sha256(password ++ salt))`, and a login attempt hashes the submitted password the same way before comparing.
//! Both the username and the digest comparison always run, in constant time, so a wrong username is not answered
//! measurably faster than a wrong password.

use keystone_common::Secret;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// The subject written into every token. There is only one administrator, so this never varies.
pub const ADMIN_SUBJECT: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Computes the stored form of a password: the lowercase hex SHA-256 digest of `password` followed by `salt`.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// The expected administrator credentials, as configured by the operator or loaded from a store.
#[derive(Clone, Debug, Default)]
pub struct StoredCredentials {
    pub username: String,
    password_hash: Secret<String>,
    salt: Secret<String>,
}

impl StoredCredentials {
    pub fn new(username: &str, password_hash: &str, salt: &str) -> Self {
        Self {
            username: username.to_string(),
            password_hash: Secret::new(password_hash.trim().to_ascii_lowercase()),
            salt: Secret::new(salt.to_string()),
        }
    }

    /// Builds credentials from a plaintext password. Handy for tests and the operator CLI.
    pub fn from_plaintext(username: &str, password: &str, salt: &str) -> Self {
        Self::new(username, &hash_password(password, salt), salt)
    }

    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password_hash.reveal().is_empty()
    }

    /// Returns the administrator subject if `username` and `password` match these credentials.
    pub fn verify(&self, username: &str, password: &str) -> Result<&'static str, CredentialError> {
        let submitted = hash_password(password, self.salt.reveal());
        let username_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let password_ok = submitted.as_bytes().ct_eq(self.password_hash.reveal().as_bytes());
        if bool::from(username_ok & password_ok) && self.is_configured() {
            Ok(ADMIN_SUBJECT)
        } else {
            Err(CredentialError::InvalidCredentials)
        }
    }
}

pub fn verify_credentials(
    username: &str,
    password: &str,
    expected: &StoredCredentials,
) -> Result<&'static str, CredentialError> {
    expected.verify(username, password)
}
