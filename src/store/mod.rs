//! Snapshot persistence.
//!
//! - `SnapshotStore`: the persistence seam the pipeline depends on
//! - `JsonFileStore`: a local JSON-file implementation

use thiserror::Error;

use crate::domain::MacroSnapshot;

pub mod json;

pub use json::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Snapshot store I/O error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot store '{path}' is not valid JSON: {reason}")]
    Corrupt { path: String, reason: String },
}

pub trait SnapshotStore: Send + Sync {
    /// Append a snapshot.
    fn save(&self, snapshot: &MacroSnapshot) -> Result<(), StoreError>;

    /// Most recent snapshot by timestamp.
    fn latest(&self) -> Result<Option<MacroSnapshot>, StoreError>;

    /// Up to `limit` snapshots, newest first.
    fn history(&self, limit: usize) -> Result<Vec<MacroSnapshot>, StoreError>;
}
