//! Validation errors for records and snapshots.

use thiserror::Error;

/// A record that violates one of the reading invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// The city name is empty or whitespace.
    #[error("record has an empty city name")]
    EmptyCity,

    /// A pollutant concentration is negative, NaN or infinite.
    #[error("{city}: {field} must be a non-negative number, got {value}")]
    InvalidConcentration {
        city: String,
        field: &'static str,
        value: f64,
    },

    /// The timestamp does not parse as an ISO-8601 date-time or date.
    #[error("{city}: timestamp {timestamp:?} is not a valid ISO-8601 date or date-time")]
    InvalidTimestamp { city: String, timestamp: String },
}

/// A snapshot that cannot be assembled from its records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    /// Two records share the same city name.
    #[error("duplicate city in snapshot: {0}")]
    DuplicateCity(String),

    /// One of the records is invalid.
    #[error(transparent)]
    Record(#[from] RecordError),
}
