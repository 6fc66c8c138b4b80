//! Built-in sample readings.

use aqwatch_types::{Snapshot, SnapshotError};
use tracing::debug;

use super::DataSource;
use crate::error::DashboardError;

/// The five-city sample, every reading stamped with the current time.
pub fn sample_snapshot() -> Result<Snapshot, SnapshotError> {
    sample_snapshot_at(None)
}

/// The five-city sample with a fixed timestamp, or the current time if `None`.
pub fn sample_snapshot_at(timestamp: Option<&str>) -> Result<Snapshot, SnapshotError> {
    let stamp = |r: aqwatch_types::RecordBuilder| match timestamp {
        Some(ts) => r.timestamp(ts),
        None => r,
    };

    Snapshot::builder()
        .record("Delhi", |r| {
            stamp(r.aqi(185).pm25(85.0).pm10(120.0).no2(45.0).so2(30.0).co(2.5))
        })
        .record("Mumbai", |r| {
            stamp(r.aqi(125).pm25(55.0).pm10(90.0).no2(35.0).so2(25.0).co(1.8))
        })
        .record("Bangalore", |r| {
            stamp(r.aqi(95).pm25(45.0).pm10(70.0).no2(25.0).so2(20.0).co(1.5))
        })
        .record("Chennai", |r| {
            stamp(r.aqi(110).pm25(50.0).pm10(80.0).no2(30.0).so2(22.0).co(1.7))
        })
        .record("Kolkata", |r| {
            stamp(r.aqi(155).pm25(70.0).pm10(100.0).no2(40.0).so2(28.0).co(2.2))
        })
        .build()
}

/// A data source that serves the built-in sample once.
///
/// Stands in for a live telemetry feed. The first poll returns the sample,
/// later polls report no change.
#[derive(Debug, Default)]
pub struct SampleSource {
    delivered: bool,
}

impl SampleSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataSource for SampleSource {
    fn poll(&mut self) -> Result<Option<Snapshot>, DashboardError> {
        if self.delivered {
            return Ok(None);
        }
        let snapshot = sample_snapshot()?;
        debug!(cities = snapshot.len(), "serving built-in sample");
        self.delivered = true;
        Ok(Some(snapshot))
    }

    fn description(&self) -> &str {
        "built-in sample"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_source_delivers_once() {
        let mut source = SampleSource::new();

        let snapshot = source.poll().unwrap().unwrap();
        assert_eq!(snapshot.len(), 5);
        assert!(snapshot.validate().is_ok());

        assert!(source.poll().unwrap().is_none());
    }

    #[test]
    fn test_sample_scenario_stats() {
        let snapshot = sample_snapshot_at(Some("2024-11-05T08:30:00.000Z")).unwrap();
        let stats = snapshot.stats().unwrap();

        assert_eq!(stats.count, 5);
        assert_eq!(stats.mean_aqi, 134);
        assert_eq!((stats.max_aqi, stats.max_city.as_str()), (185, "Delhi"));
        assert_eq!((stats.min_aqi, stats.min_city.as_str()), (95, "Bangalore"));
    }

    #[test]
    fn test_fixed_timestamp_is_applied() {
        let snapshot = sample_snapshot_at(Some("2024-11-05T08:30:00.000Z")).unwrap();
        assert!(snapshot.iter().all(|r| r.timestamp == "2024-11-05T08:30:00.000Z"));
    }
}
