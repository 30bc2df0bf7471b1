//! Stateless session tokens.
//!
//! * [`codec`] turns bytes into URL-safe token segments and back.
//! * [`signer`] computes and checks the HMAC-SHA256 tag over `header.payload`.
//! * [`service`] builds claims, issues tokens and validates them end to end.
pub mod claims;
pub mod codec;
mod errors;
pub mod service;
pub mod signer;

pub use claims::{Claims, TokenHeader, DEFAULT_TOKEN_LIFETIME};
pub use codec::DecodeError;
pub use errors::TokenError;
pub use service::{issue_token, issue_token_at, unix_now, validate_token, validate_token_at, IssuedToken, TokenService};
pub use signer::SignerError;
