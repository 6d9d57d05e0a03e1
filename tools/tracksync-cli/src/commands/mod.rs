pub mod check;
pub mod config;
pub mod info;
pub mod plot;
pub mod sync;
