//! Tracksync Processing Core
//!
//! Turns a loaded table into display-ready traces:
//! - **Statistics:** Median, causal moving average, min/max normalization
//! - **Timeline:** Canonical per-row timestamps and the sampling interval
//! - **Columns:** Eligibility scan and the user's column selection
//! - **Transform:** Normalize-then-smooth pipeline producing display sequences
//!
//! This crate is pure computation: no I/O, no media, no rendering.
//! All inputs are data; all outputs are data.

pub mod columns;
pub mod stats;
pub mod timeline;
pub mod transform;

pub use columns::{Column, ColumnSet, Selection};
pub use timeline::{TimeSource, Timeline};
pub use transform::{DisplaySequence, TransformParams};
