//! Domain types for the CRM admin console.
//!
//! Everything in this crate is pure: no I/O, no clocks other than the
//! timestamps callers pass in.

pub mod error;
pub mod guard;
pub mod login;
pub mod navigation;
pub mod roles;
pub mod session;
pub mod types;
