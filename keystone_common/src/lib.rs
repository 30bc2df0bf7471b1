//! Types shared between the Keystone engine and server crates.
mod secret;

pub use secret::Secret;
