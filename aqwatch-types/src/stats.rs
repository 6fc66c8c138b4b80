//! Aggregate statistics over a set of readings.

use crate::{classify, AirQualityRecord, Severity};

/// Summary of AQI across a non-empty set of readings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateStats {
    /// Number of readings.
    pub count: usize,
    /// Arithmetic mean of AQI, rounded half-up to the nearest integer.
    pub mean_aqi: u32,
    /// Highest AQI in the set.
    pub max_aqi: u32,
    /// First city in snapshot order with the highest AQI.
    pub max_city: String,
    /// Lowest AQI in the set.
    pub min_aqi: u32,
    /// First city in snapshot order with the lowest AQI.
    pub min_city: String,
}

impl AggregateStats {
    /// Compute statistics over the records.
    ///
    /// Returns `None` for an empty slice; there is no mean, maximum or
    /// minimum of zero readings.
    pub fn compute(records: &[AirQualityRecord]) -> Option<Self> {
        let (first, rest) = records.split_first()?;

        let mut max = first;
        let mut min = first;
        let mut sum = u64::from(first.aqi);
        for record in rest {
            sum += u64::from(record.aqi);
            if record.aqi > max.aqi {
                max = record;
            }
            if record.aqi < min.aqi {
                min = record;
            }
        }

        let count = records.len();
        Some(Self {
            count,
            mean_aqi: rounded_mean(sum, count as u64),
            max_aqi: max.aqi,
            max_city: max.city.clone(),
            min_aqi: min.aqi,
            min_city: min.city.clone(),
        })
    }

    /// Severity band of the highest reading.
    pub fn worst_severity(&self) -> Severity {
        classify(self.max_aqi)
    }
}

/// `floor(sum / n + 1/2)` in integer arithmetic. `n` must be non-zero.
fn rounded_mean(sum: u64, n: u64) -> u32 {
    ((2 * sum + n) / (2 * n)) as u32
}
