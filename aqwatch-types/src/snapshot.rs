//! Snapshot - the complete set of city readings loaded at one point in time.

use std::collections::HashSet;

use crate::{AggregateStats, AirQualityRecord, RecordBuilder, SnapshotError};

/// An ordered sequence of readings with no duplicate city names.
///
/// The order is the order the producer supplied; views render rows in this
/// order. With the `serde` feature a snapshot serializes as a plain array of
/// records, and deserialization applies the same uniqueness check as
/// [`Snapshot::new`].
///
/// # Example
///
/// ```rust
/// use aqwatch_types::Snapshot;
///
/// let snapshot = Snapshot::builder()
///     .record("Mumbai", |r| r.aqi(125).pm25(55.0))
///     .record("Chennai", |r| r.aqi(110).pm25(50.0))
///     .build()
///     .unwrap();
///
/// assert_eq!(snapshot.len(), 2);
/// assert_eq!(snapshot.records()[0].city, "Mumbai");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<AirQualityRecord>", into = "Vec<AirQualityRecord>")
)]
pub struct Snapshot {
    records: Vec<AirQualityRecord>,
}

impl Snapshot {
    /// Create a snapshot, rejecting duplicate city names.
    pub fn new(records: Vec<AirQualityRecord>) -> Result<Self, SnapshotError> {
        if let Some(dup) = first_duplicate(&records) {
            return Err(SnapshotError::DuplicateCity(dup.to_string()));
        }
        Ok(Self { records })
    }

    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Check every record's invariants.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for record in &self.records {
            record.validate()?;
        }
        Ok(())
    }

    /// Records in snapshot order.
    pub fn records(&self) -> &[AirQualityRecord] {
        &self.records
    }

    /// Number of cities in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the snapshot has no cities.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &AirQualityRecord> {
        self.records.iter()
    }

    /// Look up a city's reading.
    pub fn get(&self, city: &str) -> Option<&AirQualityRecord> {
        self.records.iter().find(|r| r.city == city)
    }

    /// Aggregate statistics, or `None` when the snapshot is empty.
    pub fn stats(&self) -> Option<AggregateStats> {
        AggregateStats::compute(&self.records)
    }

    /// Consume the snapshot, returning its records.
    pub fn into_records(self) -> Vec<AirQualityRecord> {
        self.records
    }
}

impl TryFrom<Vec<AirQualityRecord>> for Snapshot {
    type Error = SnapshotError;

    fn try_from(records: Vec<AirQualityRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<Snapshot> for Vec<AirQualityRecord> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.records
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a AirQualityRecord;
    type IntoIter = std::slice::Iter<'a, AirQualityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn first_duplicate(records: &[AirQualityRecord]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(records.len());
    records.iter().map(|r| r.city.as_str()).find(|city| !seen.insert(*city))
}

/// Builder for constructing `Snapshot` instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    records: Vec<AirQualityRecord>,
}

impl SnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city reading built using a closure.
    pub fn record<F>(mut self, city: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(RecordBuilder) -> RecordBuilder,
    {
        self.records.push(f(RecordBuilder::new(city)).build());
        self
    }

    /// Add a pre-built record.
    pub fn push(mut self, record: AirQualityRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Build the snapshot, failing on duplicate city names.
    pub fn build(self) -> Result<Snapshot, SnapshotError> {
        Snapshot::new(self.records)
    }
}
