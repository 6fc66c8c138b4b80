//! Dashboard data: validated, classified and aggregated readings.
//!
//! This module turns a raw [`Snapshot`] into the rows and summary the views
//! render. Everything a view needs is computed here once per load.

use std::fs;
use std::path::Path;
use std::time::Instant;

use aqwatch_types::{AggregateStats, AirQualityRecord, Severity, Snapshot};
use chrono::{DateTime, FixedOffset};

use super::geo::{self, GeoPoint, Viewport};
use crate::error::DashboardError;

/// One city's reading with everything derived from it.
#[derive(Debug, Clone)]
pub struct CityRow {
    /// Position in the snapshot.
    pub index: usize,
    pub record: AirQualityRecord,
    pub severity: Severity,
    pub observed_at: DateTime<FixedOffset>,
    /// Map position, `None` if the city is not in the lookup table.
    pub position: Option<GeoPoint>,
}

impl CityRow {
    pub fn city(&self) -> &str {
        &self.record.city
    }

    pub fn aqi(&self) -> u32 {
        self.record.aqi
    }
}

/// Complete dashboard data ready for display.
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Rows in snapshot order.
    pub rows: Vec<CityRow>,
    /// `None` when the snapshot holds no cities.
    pub stats: Option<AggregateStats>,
    pub last_updated: Instant,
}

impl DashboardData {
    /// Load and parse dashboard data from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::DataUnavailable(format!("read error: {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse dashboard data from a JSON array of readings.
    pub fn parse(content: &str) -> Result<Self, DashboardError> {
        let snapshot: Snapshot = serde_json::from_str(content)
            .map_err(|e| DashboardError::DataUnavailable(format!("parse error: {}", e)))?;
        Self::from_snapshot(snapshot)
    }

    /// Validate, classify and aggregate a snapshot.
    ///
    /// Fails with [`DashboardError::DataUnavailable`] on the first record
    /// that violates the reading invariants. An empty snapshot is accepted;
    /// its `stats` is `None`.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, DashboardError> {
        let stats = snapshot.stats();
        let rows = snapshot
            .into_records()
            .into_iter()
            .enumerate()
            .map(|(index, record)| -> Result<CityRow, DashboardError> {
                record.validate()?;
                let observed_at = record.observed_at()?;
                Ok(CityRow {
                    index,
                    severity: record.severity(),
                    observed_at,
                    position: geo::lookup(&record.city),
                    record,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows,
            stats,
            last_updated: Instant::now(),
        })
    }

    /// Aggregate statistics, or [`DashboardError::EmptySnapshot`].
    pub fn stats(&self) -> Result<&AggregateStats, DashboardError> {
        self.stats.as_ref().ok_or(DashboardError::EmptySnapshot)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that have a map position.
    pub fn placed(&self) -> impl Iterator<Item = (&CityRow, GeoPoint)> {
        self.rows.iter().filter_map(|r| r.position.map(|p| (r, p)))
    }

    /// Rows missing from the coordinate table.
    pub fn unplaced(&self) -> Vec<&CityRow> {
        self.rows.iter().filter(|r| r.position.is_none()).collect()
    }

    /// Map bounds fitting every placed city.
    pub fn viewport(&self) -> Viewport {
        Viewport::fit(self.placed().map(|(_, p)| p))
    }

    /// Number of cities in each severity band, in band order.
    pub fn band_counts(&self) -> [(Severity, usize); 6] {
        Severity::ALL.map(|band| (band, self.rows.iter().filter(|r| r.severity == band).count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::sample_snapshot_at;

    const TS: &str = "2024-11-05T08:30:00.000Z";

    #[test]
    fn test_from_sample_snapshot() {
        let data = DashboardData::from_snapshot(sample_snapshot_at(Some(TS)).unwrap()).unwrap();

        assert_eq!(data.len(), 5);
        let cities: Vec<&str> = data.rows.iter().map(|r| r.city()).collect();
        assert_eq!(cities, ["Delhi", "Mumbai", "Bangalore", "Chennai", "Kolkata"]);
        assert_eq!(data.rows[0].severity, Severity::Unhealthy);
        assert_eq!(data.rows[2].severity, Severity::Moderate);

        let stats = data.stats().unwrap();
        assert_eq!(stats.mean_aqi, 134);
        assert_eq!(stats.max_city, "Delhi");
        assert_eq!(stats.min_city, "Bangalore");
    }

    #[test]
    fn test_sample_cities_are_all_placed() {
        let data = DashboardData::from_snapshot(sample_snapshot_at(Some(TS)).unwrap()).unwrap();
        assert_eq!(data.placed().count(), 5);
        assert!(data.unplaced().is_empty());
    }

    #[test]
    fn test_unknown_city_is_unplaced() {
        let snapshot = Snapshot::builder()
            .record("Delhi", |r| r.aqi(185).timestamp(TS))
            .record("Springfield", |r| r.aqi(30).timestamp(TS))
            .build()
            .unwrap();
        let data = DashboardData::from_snapshot(snapshot).unwrap();

        let unplaced: Vec<&str> = data.unplaced().iter().map(|r| r.city()).collect();
        assert_eq!(unplaced, ["Springfield"]);
    }

    #[test]
    fn test_empty_snapshot_reports_no_data() {
        let data = DashboardData::from_snapshot(Snapshot::default()).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.stats().unwrap_err(), DashboardError::EmptySnapshot);
        assert_eq!(data.viewport(), Viewport::INDIA);
    }

    #[test]
    fn test_invalid_record_is_data_unavailable() {
        let snapshot = Snapshot::builder()
            .record("Delhi", |r| r.aqi(185).timestamp("not a date"))
            .build()
            .unwrap();
        let err = DashboardData::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable(msg) if msg.contains("Delhi")));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[{"city":"Pune","aqi":42,"pm25":12.5,"pm10":30,"no2":8,"so2":4,"co":0.6,"timestamp":"2024-11-05T08:30:00Z"}]"#;
        let data = DashboardData::parse(json).unwrap();
        assert_eq!(data.rows[0].record.pm25, 12.5);
        assert_eq!(data.rows[0].severity, Severity::Good);
    }

    #[test]
    fn test_parse_timestamps_without_offset() {
        let json = r#"[
            {"city":"Pune","aqi":42,"pm25":12.5,"pm10":30,"no2":8,"so2":4,"co":0.6,"timestamp":"2024-11-05T08:30:00"},
            {"city":"Agra","aqi":160,"pm25":75,"pm10":110,"no2":40,"so2":20,"co":2.0,"timestamp":"2024-11-05"}
        ]"#;
        let data = DashboardData::parse(json).unwrap();

        assert_eq!(data.rows[0].observed_at.to_rfc3339(), "2024-11-05T08:30:00+00:00");
        assert_eq!(data.rows[1].observed_at.to_rfc3339(), "2024-11-05T00:00:00+00:00");
        assert_eq!(data.rows[0].record.timestamp, "2024-11-05T08:30:00");
        assert_eq!(data.rows[1].record.timestamp, "2024-11-05");
    }

    #[test]
    fn test_band_counts() {
        let data = DashboardData::from_snapshot(sample_snapshot_at(Some(TS)).unwrap()).unwrap();
        let counts = data.band_counts();
        assert_eq!(counts[1], (Severity::Moderate, 1));
        assert_eq!(counts[2], (Severity::UnhealthySensitive, 2));
        assert_eq!(counts[3], (Severity::Unhealthy, 2));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 5);
    }
}
