//! Tracksync Common Utilities
//!
//! Shared infrastructure for all tracksync crates:
//! - Error types and result aliases
//! - Clock helpers for position clamping, frame steps, and time labels
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
