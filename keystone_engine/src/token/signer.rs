//! HMAC-SHA256 signing of token segments.
//!
//! The signature covers the encoded `header.payload` string. Verification recomputes the MAC and compares it in
//! constant time (via `Mac::verify_slice`), so a mismatching signature leaks nothing about how many bytes matched.

use hmac::{Hmac, Mac};
use log::trace;
use sha2::Sha256;
use thiserror::Error;

use super::codec;

type HmacSha256 = Hmac<Sha256>;

/// The algorithm identifier written into every token header.
pub const ALGORITHM: &str = "HS256";

/// Length in bytes of an HMAC-SHA256 tag.
pub const MAC_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("The signing key could not be used. {0}")]
    InvalidKey(String),
}

fn keyed_mac(secret_key: &[u8]) -> Result<HmacSha256, SignerError> {
    HmacSha256::new_from_slice(secret_key).map_err(|e| SignerError::InvalidKey(e.to_string()))
}

pub fn sign(message: &[u8], secret_key: &[u8]) -> Result<[u8; MAC_LENGTH], SignerError> {
    let mut mac = keyed_mac(secret_key)?;
    mac.update(message);
    let mut tag = [0u8; MAC_LENGTH];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Signs `message` and returns the tag in segment encoding.
pub fn sign_encoded(message: &str, secret_key: &[u8]) -> Result<String, SignerError> {
    sign(message.as_bytes(), secret_key).map(codec::encode)
}

/// Checks `mac` against the tag for `message`. Any wrong-length tag or unusable key simply fails verification.
pub fn verify(message: &[u8], mac: &[u8], secret_key: &[u8]) -> bool {
    match keyed_mac(secret_key) {
        Ok(mut expected) => {
            expected.update(message);
            expected.verify_slice(mac).is_ok()
        },
        Err(e) => {
            trace!("🔐️ Cannot verify signature. {e}");
            false
        },
    }
}

/// As [`verify`], but takes the tag in segment encoding. Undecodable tags fail verification.
pub fn verify_encoded(message: &str, encoded_mac: &str, secret_key: &[u8]) -> bool {
    match codec::decode(encoded_mac) {
        Ok(mac) => verify(message.as_bytes(), &mac, secret_key),
        Err(e) => {
            trace!("🔐️ Signature segment is not decodable. {e}");
            false
        },
    }
}
