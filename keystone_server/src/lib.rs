//! # Keystone server
//! The HTTP front end of the Keystone admin API. It is responsible for:
//! * Checking the administrator's credentials and issuing signed session tokens.
//! * Guarding every non-public route with a bearer-token check before any routing happens.
//! * Dispatching authenticated requests to the matching handler, and turning handler failures (panics included) into
//!   JSON error responses.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! `POST /login` is the only public route. See [routes](routes/index.html) for the full table.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod dispatch;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
