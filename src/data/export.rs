//! JSON export of the current dashboard state.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use super::DashboardData;

/// Build the export report: a summary (or `null` with no data) and one
/// entry per city with its band and display color.
pub fn build_report(data: &DashboardData) -> Value {
    let summary = match &data.stats {
        Some(stats) => json!({
            "count": stats.count,
            "mean_aqi": stats.mean_aqi,
            "max_aqi": stats.max_aqi,
            "max_city": stats.max_city,
            "min_aqi": stats.min_aqi,
            "min_city": stats.min_city,
        }),
        None => Value::Null,
    };

    let cities: Vec<Value> = data
        .rows
        .iter()
        .map(|row| {
            let r = &row.record;
            json!({
                "city": r.city,
                "aqi": r.aqi,
                "pm25": r.pm25,
                "pm10": r.pm10,
                "no2": r.no2,
                "so2": r.so2,
                "co": r.co,
                "timestamp": r.timestamp,
                "severity": row.severity.label(),
                "color": row.severity.hex(),
            })
        })
        .collect();

    json!({ "summary": summary, "cities": cities })
}

/// Write the export report to `path` as pretty-printed JSON.
pub fn write_report(data: &DashboardData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&build_report(data))?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::sample_snapshot_at;
    use aqwatch_types::Snapshot;

    fn sample() -> DashboardData {
        DashboardData::from_snapshot(sample_snapshot_at(Some("2024-11-05T08:30:00.000Z")).unwrap())
            .unwrap()
    }

    #[test]
    fn test_report_summary() {
        let report = build_report(&sample());
        assert_eq!(report["summary"]["count"], 5);
        assert_eq!(report["summary"]["mean_aqi"], 134);
        assert_eq!(report["summary"]["max_city"], "Delhi");
        assert_eq!(report["summary"]["min_aqi"], 95);
    }

    #[test]
    fn test_report_cities_in_order_with_bands() {
        let report = build_report(&sample());
        let cities = report["cities"].as_array().unwrap();
        assert_eq!(cities.len(), 5);
        assert_eq!(cities[0]["city"], "Delhi");
        assert_eq!(cities[0]["severity"], "Unhealthy");
        assert_eq!(cities[0]["color"], "#ef4444");
        assert_eq!(cities[0]["timestamp"], "2024-11-05T08:30:00.000Z");
    }

    #[test]
    fn test_report_without_data() {
        let data = DashboardData::from_snapshot(Snapshot::default()).unwrap();
        let report = build_report(&data);
        assert!(report["summary"].is_null());
        assert_eq!(report["cities"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        write_report(&sample(), &path).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["summary"]["max_aqi"], 185);
    }
}
