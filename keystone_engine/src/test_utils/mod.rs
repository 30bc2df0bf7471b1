//! Helpers shared by tests in this crate and in the server crate. Enabled with the `test_utils` feature.
use keystone_common::Secret;
use log::debug;

use crate::{credentials::StoredCredentials, token::TokenService};

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "correct horse battery staple";
pub const TEST_SALT: &str = "test-salt";
/// Signing key for tests. DO NOT re-use this anywhere.
pub const TEST_SECRET: &[u8] = b"keystone-test-signing-key-do-not-use";

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
}

pub fn test_credentials() -> StoredCredentials {
    StoredCredentials::from_plaintext(TEST_USERNAME, TEST_PASSWORD, TEST_SALT)
}

pub fn test_token_service(lifetime: Option<i64>) -> TokenService {
    TokenService::new(Secret::new(TEST_SECRET.to_vec()), lifetime)
}
