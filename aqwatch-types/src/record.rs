//! A single city's air-quality reading.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::{classify, RecordError, Severity};

/// One city's reading at one moment.
///
/// Concentrations of PM2.5, PM10, NO2 and SO2 are in µg/m³, CO is in ppm.
/// The timestamp is kept as the ISO-8601 string it was received with so that
/// re-serializing a record reproduces it exactly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirQualityRecord {
    /// City name, unique within a snapshot.
    pub city: String,
    /// Composite air quality index.
    pub aqi: u32,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
    /// When the reading was taken (ISO-8601).
    pub timestamp: String,
}

impl AirQualityRecord {
    /// Start building a record for the given city.
    pub fn builder(city: impl Into<String>) -> RecordBuilder {
        RecordBuilder::new(city)
    }

    /// Severity band of this reading's AQI.
    pub fn severity(&self) -> Severity {
        classify(self.aqi)
    }

    /// Pollutant concentrations paired with their field names.
    pub fn concentrations(&self) -> [(&'static str, f64); 5] {
        [
            ("pm25", self.pm25),
            ("pm10", self.pm10),
            ("no2", self.no2),
            ("so2", self.so2),
            ("co", self.co),
        ]
    }

    /// Parse the timestamp.
    ///
    /// Accepts RFC 3339, a date-time without offset, or a bare date. The last
    /// two are taken as UTC; a bare date is midnight.
    pub fn observed_at(&self) -> Result<DateTime<FixedOffset>, RecordError> {
        parse_timestamp(self.timestamp.trim()).ok_or_else(|| RecordError::InvalidTimestamp {
            city: self.city.clone(),
            timestamp: self.timestamp.clone(),
        })
    }

    /// Check the record invariants: non-empty city, finite non-negative
    /// concentrations, parseable timestamp.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.city.trim().is_empty() {
            return Err(RecordError::EmptyCity);
        }
        for (field, value) in self.concentrations() {
            if !value.is_finite() || value < 0.0 {
                return Err(RecordError::InvalidConcentration {
                    city: self.city.clone(),
                    field,
                    value,
                });
            }
        }
        self.observed_at().map(|_| ())
    }
}

/// Fluent builder for [`AirQualityRecord`].
///
/// Unset concentrations default to zero and the timestamp defaults to the
/// current UTC time with millisecond precision.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    city: String,
    aqi: u32,
    pm25: f64,
    pm10: f64,
    no2: f64,
    so2: f64,
    co: f64,
    timestamp: Option<String>,
}

impl RecordBuilder {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            aqi: 0,
            pm25: 0.0,
            pm10: 0.0,
            no2: 0.0,
            so2: 0.0,
            co: 0.0,
            timestamp: None,
        }
    }

    pub fn aqi(mut self, aqi: u32) -> Self {
        self.aqi = aqi;
        self
    }

    pub fn pm25(mut self, value: f64) -> Self {
        self.pm25 = value;
        self
    }

    pub fn pm10(mut self, value: f64) -> Self {
        self.pm10 = value;
        self
    }

    pub fn no2(mut self, value: f64) -> Self {
        self.no2 = value;
        self
    }

    pub fn so2(mut self, value: f64) -> Self {
        self.so2 = value;
        self
    }

    pub fn co(mut self, value: f64) -> Self {
        self.co = value;
        self
    }

    /// Set an explicit ISO-8601 timestamp.
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn build(self) -> AirQualityRecord {
        AirQualityRecord {
            city: self.city,
            aqi: self.aqi,
            pm25: self.pm25,
            pm10: self.pm10,
            no2: self.no2,
            so2: self.so2,
            co: self.co,
            timestamp: self.timestamp.unwrap_or_else(current_timestamp),
        }
    }
}

/// Offset-less forms tried after RFC 3339.
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at);
    }
    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;
    Some(naive.and_utc().fixed_offset())
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delhi() -> AirQualityRecord {
        AirQualityRecord::builder("Delhi")
            .aqi(185)
            .pm25(85.0)
            .pm10(120.0)
            .no2(45.0)
            .so2(30.0)
            .co(2.5)
            .timestamp("2024-11-05T08:30:00.000Z")
            .build()
    }

    #[test]
    fn test_valid_record() {
        let record = delhi();
        assert!(record.validate().is_ok());
        assert_eq!(record.severity(), Severity::Unhealthy);
    }

    #[test]
    fn test_default_timestamp_is_valid() {
        let record = AirQualityRecord::builder("Pune").aqi(40).build();
        assert!(record.timestamp.ends_with('Z'));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_negative_concentration_rejected() {
        let mut record = delhi();
        record.so2 = -1.0;
        assert_eq!(
            record.validate(),
            Err(RecordError::InvalidConcentration {
                city: "Delhi".to_string(),
                field: "so2",
                value: -1.0,
            })
        );
    }

    #[test]
    fn test_nan_concentration_rejected() {
        let mut record = delhi();
        record.co = f64::NAN;
        assert!(matches!(
            record.validate(),
            Err(RecordError::InvalidConcentration { field: "co", .. })
        ));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let mut record = delhi();
        record.timestamp = "yesterday".to_string();
        assert!(matches!(record.validate(), Err(RecordError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_empty_city_rejected() {
        let mut record = delhi();
        record.city = "  ".to_string();
        assert_eq!(record.validate(), Err(RecordError::EmptyCity));
    }

    #[test]
    fn test_timestamp_without_offset_is_utc() {
        let mut record = delhi();
        record.timestamp = "2024-11-05T08:30:00".to_string();
        assert!(record.validate().is_ok());

        let at = record.observed_at().unwrap();
        assert_eq!(at.offset().local_minus_utc(), 0);
        assert_eq!(at.to_rfc3339(), "2024-11-05T08:30:00+00:00");
        assert_eq!(record.timestamp, "2024-11-05T08:30:00");

        record.timestamp = "2024-11-05 08:30:00.250".to_string();
        assert_eq!(record.observed_at().unwrap().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_date_only_timestamp_is_midnight_utc() {
        let mut record = delhi();
        record.timestamp = "2024-11-05".to_string();
        assert!(record.validate().is_ok());
        assert_eq!(record.observed_at().unwrap().to_rfc3339(), "2024-11-05T00:00:00+00:00");
    }

    #[test]
    fn test_observed_at_keeps_offset() {
        let mut record = delhi();
        record.timestamp = "2024-11-05T14:00:00+05:30".to_string();
        let at = record.observed_at().unwrap();
        assert_eq!(at.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }
}
