//! Errors surfaced to the dashboard.

use aqwatch_types::{RecordError, SnapshotError};
use thiserror::Error;

/// Failures that reach the rendering layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// The source could not produce a usable snapshot (read, parse or
    /// validation failure).
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// The snapshot loaded but holds no cities.
    #[error("snapshot contains no cities")]
    EmptySnapshot,
}

impl From<SnapshotError> for DashboardError {
    fn from(err: SnapshotError) -> Self {
        DashboardError::DataUnavailable(err.to_string())
    }
}

impl From<RecordError> for DashboardError {
    fn from(err: RecordError) -> Self {
        DashboardError::DataUnavailable(err.to_string())
    }
}
