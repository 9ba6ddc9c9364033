//! Integration test utilities for the blog server
//!
//! Spawns the full HTTP stack on an ephemeral port, backed by the in-memory
//! repositories, so end-to-end tests run without external services.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
