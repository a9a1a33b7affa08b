//! hlsfixture - deterministic HLS test server
//!
//! This library crate exposes the server for integration testing.

pub mod config;
pub mod inspect;
pub mod server;
pub mod streaming;
