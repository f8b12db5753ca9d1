//! `macro-regime` library crate.
//!
//! The binary (`macro-dash`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the FRED client, store, notifier and analyzer sit behind traits and can be
//!   swapped for in-memory fakes
//! - code stays easy to navigate as the project grows

pub mod analyze;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod notify;
pub mod report;
pub mod signals;
pub mod store;
pub mod tui;
