//! CRM admin console server library.
//!
//! Exposes the building blocks (config, state, error handling, gates,
//! routes) so integration tests and the binary entrypoint can both reach
//! them.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
