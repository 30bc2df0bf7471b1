//! Keystone Engine
//!
//! The authentication and dispatch core of the Keystone admin API. Nothing in this crate knows about HTTP frameworks;
//! the server crate plugs these pieces into actix-web.
//!
//! The library is divided into these sections:
//! 1. Stateless session tokens ([`mod@token`]): URL-safe segment encoding, HMAC-SHA256 signing and the token service
//!    that issues and validates `header.payload.signature` tokens with `sub`, `iat` and `exp` claims.
//! 2. Credential checks ([`mod@credentials`]) for the single administrator account, using a salted SHA-256 digest and
//!    constant-time comparisons.
//! 3. Access control ([`mod@access`]): a default-deny policy naming the few public routes, and bearer header parsing.
//! 4. Routing ([`mod@router`]): an ordered route table with `:named` path captures.
//! 5. Backends and their APIs. The traits in [`traits`] define what a storage backend must provide, and the API types
//!    ([`AuthApi`], [`ContentApi`], [`MediaApi`]) add validation on top. In-memory backends are included.
pub mod access;
pub mod credentials;
mod db;
pub mod db_types;
mod ks_api;
pub mod router;
pub mod token;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use access::{extract_bearer_token, AccessPolicy, GateError};
pub use credentials::{hash_password, verify_credentials, CredentialError, StoredCredentials, ADMIN_SUBJECT};
pub use db::{
    memory::{MemoryContentStore, MemoryMediaStore},
    traits,
};
pub use ks_api::{
    auth_api::AuthApi,
    content_api::ContentApi,
    errors::{AuthApiError, ContentApiError, MediaApiError},
    media_api::MediaApi,
};
pub use router::{PathParams, RouteMatch, RouteMethod, RoutePattern, RouteTable, RouterError};
pub use token::{Claims, IssuedToken, TokenError, TokenService, DEFAULT_TOKEN_LIFETIME};
