//! Input/output helpers.
//!
//! - history exports (CSV) (`export`)

pub mod export;

pub use export::*;
