//! Reporting utilities: text tables for snapshots, scores and history.

pub mod format;

pub use format::*;
