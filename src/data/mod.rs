//! Data models and processing for air-quality snapshots.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Validated rows and summary ([`DashboardData`], [`CityRow`])
//! - [`geo`]: City coordinate lookup and map viewport fitting
//! - [`export`]: JSON report of the current state
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot (from a DataSource)
//!        │
//!        ▼
//! DashboardData::from_snapshot()
//!        │
//!        ├──▶ CityRow (validated record + severity band + map position)
//!        │
//!        └──▶ AggregateStats (None when empty)
//! ```

pub mod dashboard;
pub mod export;
pub mod geo;

pub use dashboard::{CityRow, DashboardData};
pub use geo::{GeoPoint, Viewport};
