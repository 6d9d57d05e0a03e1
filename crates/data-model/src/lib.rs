//! Tracksync Data Model
//!
//! Defines the core data contracts shared by the engine and the CLI:
//! - **Rows:** Loosely typed CSV records with explicit numeric coercion
//! - **Tables:** Header-ordered collections of rows loaded from CSV
//! - **Media:** Video descriptors, playability guesses, and status taxonomy
//!
//! Nothing in this crate fails on a bad cell. Malformed or missing values
//! become gaps (`f64::NAN`) at coercion time.

pub mod media;
pub mod row;
pub mod table;

pub use media::*;
pub use row::*;
pub use table::*;
