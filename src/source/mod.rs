//! Data source abstraction for receiving air-quality snapshots.
//!
//! The dashboard never reaches for readings on its own; it is handed a
//! [`DataSource`] and polls it. This keeps the application state free of
//! globals and lets tests inject fixtures.

mod channel;
mod file;
mod sample;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use sample::{sample_snapshot, sample_snapshot_at, SampleSource};

use std::fmt::Debug;

use aqwatch_types::Snapshot;

use crate::error::DashboardError;

/// Trait for receiving snapshots from various sources.
///
/// # Example
///
/// ```
/// use aqwatch::{DataSource, SampleSource};
///
/// let mut source = SampleSource::new();
/// if let Ok(Some(snapshot)) = source.poll() {
///     println!("Got {} cities", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Ok(Some(snapshot))` if new data is available, `Ok(None)` if
    /// nothing changed since the last poll, and
    /// [`DashboardError::DataUnavailable`] if the source failed.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Result<Option<Snapshot>, DashboardError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
