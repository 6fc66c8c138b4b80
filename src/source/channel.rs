//! Channel-based data source.
//!
//! Receives snapshots via a tokio watch channel. Used when an embedding
//! program pushes readings, and by tests to inject fixtures.

use aqwatch_types::Snapshot;
use tokio::sync::watch;

use super::DataSource;
use crate::error::DashboardError;

/// A data source that receives snapshots via a channel.
///
/// # Example
///
/// ```
/// use aqwatch::{ChannelSource, DataSource};
/// use aqwatch_types::Snapshot;
///
/// let (tx, mut source) = ChannelSource::create("sensor-gateway");
/// assert!(source.poll().unwrap().is_none());
///
/// tx.send(Snapshot::default()).unwrap();
/// assert!(source.poll().unwrap().is_some());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Snapshot>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// Only values sent after the receiver was created are returned by
    /// [`DataSource::poll`].
    pub fn new(receiver: watch::Receiver<Snapshot>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair. Nothing is delivered until the sender sends.
    pub fn create(source_description: &str) -> (watch::Sender<Snapshot>, Self) {
        let (tx, rx) = watch::channel(Snapshot::default());
        (tx, Self::new(rx, source_description))
    }

    /// Create a channel pair whose first poll returns `initial`.
    pub fn with_initial(
        initial: Snapshot,
        source_description: &str,
    ) -> (watch::Sender<Snapshot>, Self) {
        let (tx, mut rx) = watch::channel(initial);
        rx.mark_changed();
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Result<Option<Snapshot>, DashboardError> {
        // An unread value is delivered even after the sender is gone.
        let latest = self.receiver.borrow_and_update();
        if latest.has_changed() {
            return Ok(Some(latest.clone()));
        }
        drop(latest);

        match self.receiver.has_changed() {
            Ok(_) => Ok(None),
            Err(_) => Err(DashboardError::DataUnavailable(format!(
                "{} closed",
                self.description
            ))),
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_city(aqi: u32) -> Snapshot {
        Snapshot::builder()
            .record("Delhi", |r| r.aqi(aqi).timestamp("2024-11-05T08:30:00Z"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        assert!(source.poll().unwrap().is_none());

        tx.send(one_city(185)).unwrap();
        let snapshot = source.poll().unwrap().unwrap();
        assert_eq!(snapshot.get("Delhi").map(|r| r.aqi), Some(185));

        assert!(source.poll().unwrap().is_none());
    }

    #[test]
    fn test_channel_source_initial_value() {
        let (_tx, mut source) = ChannelSource::with_initial(one_city(42), "fixture");
        assert_eq!(source.poll().unwrap().map(|s| s.len()), Some(1));
        assert!(source.poll().unwrap().is_none());
        assert_eq!(source.description(), "channel: fixture");
    }

    #[test]
    fn test_last_snapshot_survives_sender_drop() {
        let (tx, mut source) = ChannelSource::create("producer");
        tx.send(one_city(155)).unwrap();
        drop(tx);

        let snapshot = source.poll().unwrap().unwrap();
        assert_eq!(snapshot.get("Delhi").map(|r| r.aqi), Some(155));
        assert!(matches!(source.poll(), Err(DashboardError::DataUnavailable(_))));
    }

    #[test]
    fn test_initial_value_survives_sender_drop() {
        let (tx, mut source) = ChannelSource::with_initial(one_city(42), "fixture");
        drop(tx);
        assert!(source.poll().unwrap().is_some());
        assert!(source.poll().is_err());
    }

    #[test]
    fn test_channel_source_closed() {
        let (tx, mut source) = ChannelSource::create("test");
        drop(tx);
        assert!(matches!(source.poll(), Err(DashboardError::DataUnavailable(_))));
    }
}
