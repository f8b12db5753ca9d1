//! JSON-file snapshot store.
//!
//! The file holds a single array of snapshots in insertion order. Writes go
//! to a sibling temp file that is renamed over the original.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::MacroSnapshot;
use crate::store::{SnapshotStore, StoreError};

pub const DEFAULT_STORE_PATH: &str = "data/snapshots.json";

pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_all(&self) -> Result<Vec<MacroSnapshot>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write_all(&self, snapshots: &[MacroSnapshot]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let file = File::create(&tmp).map_err(|e| self.io_err(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshots)
            .map_err(|e| self.io_err(std::io::Error::other(e)))?;
        writer.flush().map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: &MacroSnapshot) -> Result<(), StoreError> {
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut all = self.read_all()?;
        all.push(snapshot.clone());
        self.write_all(&all)?;
        log::debug!("saved snapshot ({} stored) to {}", all.len(), self.path.display());
        Ok(())
    }

    fn latest(&self) -> Result<Option<MacroSnapshot>, StoreError> {
        Ok(self.read_all()?.into_iter().max_by_key(|s| s.timestamp))
    }

    fn history(&self, limit: usize) -> Result<Vec<MacroSnapshot>, StoreError> {
        let mut all = self.read_all()?;
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        all.truncate(limit);
        Ok(all)
    }
}
