//! Topic-based notification bus for store subscribers.
//!
//! UI collaborators subscribe to the slots they render; a widget that only
//! shows the roster is never woken by quest or encounter churn.

use std::collections::HashMap;

use client_channel_core::{ChannelFault, ConnectionStatus};
use realm_core::Revision;
use tokio::sync::broadcast;

/// Topics a subscriber can follow, one per independently observable slot.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Whole-snapshot replacement.
    Snapshot,
    /// Party roster projection.
    Presence,
    /// Encounter projection.
    Encounter,
    /// Connection status.
    Connection,
    /// Last-error slot.
    Fault,
}

const TOPICS: [Topic; 5] = [
    Topic::Snapshot,
    Topic::Presence,
    Topic::Encounter,
    Topic::Connection,
    Topic::Fault,
];

/// Notification delivered to subscribers of one topic.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A new snapshot was accepted. Carries the revision recorded with it.
    SnapshotReplaced { revision: Option<Revision> },
    PresenceChanged,
    EncounterChanged,
    ConnectionChanged(ConnectionStatus),
    FaultRecorded(ChannelFault),
    FaultCleared,
    /// The store returned to its initial state; sent on every topic.
    Reset,
}

/// Topic-keyed broadcast fan-out.
///
/// Publishing is best-effort: with no subscribers the event is dropped, and
/// a lagging subscriber loses the oldest notifications first. Notifications
/// are wake-ups, not state carriers; subscribers re-read the store.
pub struct StoreBus {
    channels: HashMap<Topic, broadcast::Sender<StoreEvent>>,
}

impl StoreBus {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let channels = TOPICS
            .iter()
            .map(|topic| (*topic, broadcast::channel(capacity).0))
            .collect();
        Self { channels }
    }

    /// Publish an event to one topic.
    pub fn publish(&self, topic: Topic, event: StoreEvent) {
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic; normal, not an error.
            tracing::trace!(?topic, "no subscribers for store topic");
        }
    }

    /// Publish the same event to every topic (used by reset).
    pub fn publish_all(&self, event: StoreEvent) {
        for topic in TOPICS {
            self.publish(topic, event.clone());
        }
    }

    /// Subscribe to a single topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<StoreEvent> {
        self.channels
            .get(&topic)
            .expect("bus channels are pre-created for every topic")
            .subscribe()
    }
}

impl Default for StoreBus {
    fn default() -> Self {
        Self::new()
    }
}
