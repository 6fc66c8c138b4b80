//! # aqwatch
//!
//! A terminal dashboard and library for city air-quality readings.
//!
//! Readings arrive as snapshots (one record per city: AQI, five pollutant
//! concentrations and an observation time). Each reading is classified into
//! one of six severity bands, the snapshot is aggregated into summary
//! statistics, and the result is drawn as a map, a grouped bar chart and a
//! sortable table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(classify)│    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── SampleSource | FileSource | ChannelSource  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation and user interaction
//! - **[`source`]**: The [`DataSource`] trait with built-in sample, file
//!   polling and channel implementations
//! - **[`data`]**: Converts a raw snapshot into classified rows, summary
//!   statistics and map positions; JSON export
//! - **[`ui`]**: Rendering with ratatui: summary cards, map, chart, table
//!   and theme support
//! - **[`config`]** and **[`logging`]**: layered settings and file logging
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Built-in sample data
//! aqwatch
//!
//! # Watch a JSON file of readings, refreshing every 10 seconds
//! aqwatch --file readings.json --refresh 10
//!
//! # Write a report and exit
//! aqwatch --file readings.json --export report.json
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use aqwatch::{App, ChannelSource};
//! use aqwatch::ui::Theme;
//! use aqwatch_types::Snapshot;
//!
//! let (tx, source) = ChannelSource::create("sensor feed");
//! let mut app = App::new(Box::new(source), Theme::dark());
//!
//! let snapshot = Snapshot::builder()
//!     .record("Delhi", |r| r.aqi(185).pm25(85.0))
//!     .build()
//!     .unwrap();
//! tx.send(snapshot).unwrap();
//!
//! assert_eq!(app.reload_data(), Ok(true));
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, LoadState, View};
pub use config::{Settings, ThemeChoice};
pub use data::{CityRow, DashboardData};
pub use error::DashboardError;
pub use source::{ChannelSource, DataSource, FileSource, SampleSource};
