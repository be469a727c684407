//! Library interface for the docsync CLI
//!
//! Publishing and rollback live here so integration tests can drive them
//! against the mock document store; argument parsing stays in main.rs.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod publish;

pub use publish::{build_version, publish, rollback, PublishReport};

// Re-export commonly needed types for tests
pub use docsync_core::config::Config;
