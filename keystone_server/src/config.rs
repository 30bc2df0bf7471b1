use std::env;

use keystone_common::Secret;
use keystone_engine::{StoredCredentials, ADMIN_SUBJECT, DEFAULT_TOKEN_LIFETIME};
use log::*;
use rand::{thread_rng, Rng};

const DEFAULT_KS_HOST: &str = "127.0.0.1";
const DEFAULT_KS_PORT: u16 = 8360;
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const GENERATED_SECRET_LENGTH: usize = 32;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub auth: AuthConfig,
    /// Request bodies larger than this are rejected with 413 before any handler runs.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_KS_HOST.to_string(),
            port: DEFAULT_KS_PORT,
            auth: AuthConfig::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("KS_HOST").ok().unwrap_or_else(|| DEFAULT_KS_HOST.into());
        let port = env::var("KS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for KS_PORT. {e} Using the default, {DEFAULT_KS_PORT}, instead.");
                    DEFAULT_KS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_KS_PORT);
        let max_body_bytes = env::var("KS_MAX_BODY_BYTES")
            .map(|s| {
                s.parse::<usize>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid size for KS_MAX_BODY_BYTES. {e} Using the default, \
                         {DEFAULT_MAX_BODY_BYTES}, instead."
                    );
                    DEFAULT_MAX_BODY_BYTES
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);
        let auth = AuthConfig::from_env_or_default();
        Self { host, port, auth, max_body_bytes }
    }
}

//--------------------------------------------   AuthConfig   --------------------------------------------------------

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HMAC key used to sign and verify session tokens.
    pub jwt_secret: Secret<Vec<u8>>,
    /// Token lifetime in seconds.
    pub token_lifetime: i64,
    pub admin: StoredCredentials,
}

impl Default for AuthConfig {
    /// A usable but locked-down configuration: a fresh random signing key and no administrator password, so every
    /// login attempt fails.
    fn default() -> Self {
        Self {
            jwt_secret: random_secret(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
            admin: StoredCredentials::default(),
        }
    }
}

impl AuthConfig {
    pub fn from_env_or_default() -> Self {
        let jwt_secret = env::var("KS_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| Secret::new(s.into_bytes()))
            .unwrap_or_else(|| {
                warn!(
                    "🪛️ KS_JWT_SECRET is not set. A random signing key has been generated. Sessions will not survive \
                     a restart, and tokens will not be accepted by other instances."
                );
                random_secret()
            });
        let token_lifetime = parse_token_lifetime(env::var("KS_TOKEN_LIFETIME").ok().as_deref());
        let username = env::var("KS_ADMIN_USERNAME").ok().unwrap_or_else(|| ADMIN_SUBJECT.to_string());
        let admin = match env::var("KS_ADMIN_PASSWORD_HASH") {
            Ok(hash) if !hash.trim().is_empty() => {
                let salt = env::var("KS_ADMIN_PASSWORD_SALT").ok().unwrap_or_else(|| {
                    warn!("🪛️ KS_ADMIN_PASSWORD_SALT is not set. The password hash is assumed to be unsalted.");
                    String::default()
                });
                StoredCredentials::new(&username, &hash, &salt)
            },
            _ => {
                error!(
                    "🪛️ KS_ADMIN_PASSWORD_HASH is not set. Nobody will be able to log in. Run `keystone_server \
                     hash-password <password> <salt>` to generate a value."
                );
                StoredCredentials::default()
            },
        };
        Self { jwt_secret, token_lifetime, admin }
    }
}

/// Reads a token lifetime in seconds. Missing, unparseable or non-positive values fall back to the default.
pub fn parse_token_lifetime(value: Option<&str>) -> i64 {
    match value.map(|s| s.trim().parse::<i64>()) {
        None => DEFAULT_TOKEN_LIFETIME,
        Some(Ok(v)) if v > 0 => v,
        Some(Ok(v)) => {
            warn!("🪛️ KS_TOKEN_LIFETIME must be positive, but was {v}. Using {DEFAULT_TOKEN_LIFETIME} seconds.");
            DEFAULT_TOKEN_LIFETIME
        },
        Some(Err(e)) => {
            warn!("🪛️ KS_TOKEN_LIFETIME is not a number. {e}. Using {DEFAULT_TOKEN_LIFETIME} seconds.");
            DEFAULT_TOKEN_LIFETIME
        },
    }
}

fn random_secret() -> Secret<Vec<u8>> {
    let mut key = vec![0u8; GENERATED_SECRET_LENGTH];
    thread_rng().fill(key.as_mut_slice());
    Secret::new(key)
}
