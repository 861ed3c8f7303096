//! HelloWorld CLI Library
//!
//! Argument parsing and command implementations behind the `hello-world`
//! binary. Commands take their provider and sender as trait objects so they
//! run the same against Toncenter and against the in-memory sandbox.

pub mod args;
pub mod commands;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
