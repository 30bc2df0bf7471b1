//! URL-safe encoding for token segments.
//!
//! Segments use the standard base64 alphabet with `+` replaced by `-` and `/` replaced by `_`, and without trailing
//! `=` padding. Decoding accepts input with or without padding, so a segment that has been padded by some
//! intermediary still decodes to the same bytes.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use thiserror::Error;

/// The separator between the header, payload and signature segments of a token.
pub const SEGMENT_SEPARATOR: char = '.';

const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_encode_padding(false).with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid token segment encoding. {0}")]
pub struct DecodeError(String);

pub fn encode<B: AsRef<[u8]>>(bytes: B) -> String {
    SEGMENT_ENGINE.encode(bytes)
}

pub fn encode_str(text: &str) -> String {
    encode(text.as_bytes())
}

pub fn decode<S: AsRef<str>>(text: S) -> Result<Vec<u8>, DecodeError> {
    SEGMENT_ENGINE.decode(text.as_ref()).map_err(|e| DecodeError(e.to_string()))
}

pub fn decode_str<S: AsRef<str>>(text: S) -> Result<String, DecodeError> {
    let bytes = decode(text)?;
    String::from_utf8(bytes).map_err(|e| DecodeError(format!("Segment is not valid UTF-8. {e}")))
}

/// The three encoded segments of a token, borrowed from the token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Splits a token on `.`. Returns `None` unless there are exactly three segments and none of them is empty.
    pub fn split(token: &'a str) -> Option<Self> {
        let mut parts = token.split(SEGMENT_SEPARATOR);
        let header = parts.next()?;
        let payload = parts.next()?;
        let signature = parts.next()?;
        if parts.next().is_some() || header.is_empty() || payload.is_empty() || signature.is_empty() {
            return None;
        }
        Some(Self { header, payload, signature })
    }

    /// The bytes covered by the signature: `header.payload`.
    pub fn signing_input(&self) -> String {
        signing_input(self.header, self.payload)
    }
}

pub fn signing_input(header: &str, payload: &str) -> String {
    format!("{header}{SEGMENT_SEPARATOR}{payload}")
}

pub fn join(header: &str, payload: &str, signature: &str) -> String {
    format!("{header}{SEGMENT_SEPARATOR}{payload}{SEGMENT_SEPARATOR}{signature}")
}
