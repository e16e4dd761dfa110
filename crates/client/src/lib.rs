//! HTTP client for the upstream CRM API.
//!
//! - [`ApiClient::authenticate`] -- exchanges credentials for a session profile.
//! - [`ApiClient::fetch_collection`] -- reads a protected collection with a bearer token.

pub mod client;
pub mod error;
pub mod wire;

pub use client::ApiClient;
pub use error::ClientError;
