//! # aqwatch-types
//!
//! Core types for air-quality dashboards. This crate defines the reading
//! record, the ordered snapshot of readings, the AQI severity bands and the
//! aggregate statistics derived from a snapshot. It has no rendering
//! dependencies and can be used by any producer or consumer of readings.
//!
//! ## Features
//!
//! - `serde`: JSON (or any serde format) serialization of records and snapshots.
//!   A snapshot serializes as a plain array of records.
//!
//! ## Example
//!
//! ```rust
//! use aqwatch_types::{classify, AggregateStats, Severity, Snapshot};
//!
//! let snapshot = Snapshot::builder()
//!     .record("Delhi", |r| r.aqi(185).pm25(85.0).pm10(120.0))
//!     .record("Bangalore", |r| r.aqi(95).pm25(45.0).pm10(70.0))
//!     .build()
//!     .unwrap();
//!
//! let stats = snapshot.stats().unwrap();
//! assert_eq!(stats.count, 2);
//! assert_eq!(stats.mean_aqi, 140);
//! assert_eq!(stats.max_city, "Delhi");
//!
//! assert_eq!(classify(50), Severity::Good);
//! assert_eq!(classify(51), Severity::Moderate);
//! ```

mod error;
mod record;
mod severity;
mod snapshot;
mod stats;

pub use error::{RecordError, SnapshotError};
pub use record::{AirQualityRecord, RecordBuilder};
pub use severity::{classify, Severity};
pub use snapshot::{Snapshot, SnapshotBuilder};
pub use stats::AggregateStats;
