//! File-based data source.
//!
//! Polls a JSON file holding an array of readings.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use aqwatch_types::Snapshot;
use tracing::{debug, warn};

use super::DataSource;
use crate::error::DashboardError;

/// A data source that reads snapshots from a JSON file.
///
/// The source tracks the file's modification time and only returns new data
/// when the file has been updated. A read, parse or validation failure is
/// reported on every poll until the file is fixed.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_modified: None,
        }
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read, parse and validate the file.
    fn read_file(&self) -> Result<Snapshot, DashboardError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| DashboardError::DataUnavailable(format!("read error: {}", e)))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|e| DashboardError::DataUnavailable(format!("parse error: {}", e)))?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Result<Option<Snapshot>, DashboardError> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,
            (Some(_), None) => {
                return Err(DashboardError::DataUnavailable(format!(
                    "{} no longer exists",
                    self.path.display()
                )));
            }
            (Some(last), Some(current)) => current > last,
        };

        if !file_changed {
            return Ok(None);
        }

        match self.read_file() {
            Ok(snapshot) => {
                debug!(path = %self.path.display(), cities = snapshot.len(), "read snapshot file");
                self.last_modified = current_modified;
                Ok(Some(snapshot))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read snapshot file");
                Err(e)
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
