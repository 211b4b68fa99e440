use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, RosterError};
use crate::student::StudentRecord;

pub const SNAPSHOT_FILE: &str = "students.json";

/// Whole-file JSON snapshot of the roster under a data directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let path = data_dir.join(SNAPSHOT_FILE);
        Self { data_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| RosterError::io(&self.data_dir, e))
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads every record in the snapshot.
    ///
    /// An empty file holds no records. A top-level value other than an array
    /// is treated the same way; the caller gets `Ok(None)` so it can report it.
    pub fn read(&self) -> Result<Option<Vec<StudentRecord>>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| RosterError::io(&self.path, e))?;
        if raw.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }
        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| RosterError::json(&self.path, e))?;
        if !value.is_array() {
            return Ok(None);
        }
        let records: Vec<StudentRecord> =
            serde_json::from_value(value).map_err(|e| RosterError::json(&self.path, e))?;
        debug!(path = %self.path.display(), count = records.len(), "snapshot read");
        Ok(Some(records))
    }

    /// Replaces the snapshot with `records`.
    ///
    /// The payload goes to a sibling temp file first and is renamed over the
    /// snapshot, so a failed write leaves the previous snapshot intact.
    pub fn write(&self, records: &[StudentRecord]) -> Result<()> {
        let payload =
            serde_json::to_string_pretty(records).map_err(|e| RosterError::json(&self.path, e))?;

        let tmp = self.path.with_extension("json.saving");
        {
            let mut f = std::fs::File::create(&tmp).map_err(|e| RosterError::io(&tmp, e))?;
            f.write_all(payload.as_bytes())
                .map_err(|e| RosterError::io(&tmp, e))?;
            f.flush().map_err(|e| RosterError::io(&tmp, e))?;
        }
        std::fs::rename(&tmp, &self.path).map_err(|e| RosterError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = records.len(), "snapshot written");
        Ok(())
    }
}
