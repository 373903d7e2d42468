//! The reconciliation store: slot ownership and orchestration.

use std::sync::Arc;

use client_channel_core::{ChannelFault, ConnectionStatus, SnapshotMessage};
use realm_core::{Encounter, PartyRoster, RealmSnapshot, Revision};
use tokio::sync::broadcast;

use crate::bus::{StoreBus, StoreEvent, Topic};
use crate::gate::{self, GateDecision};
use crate::reducer;
use crate::scope::UpdateScope;

/// Owns the client's view of one realm.
///
/// All mutation funnels through the operations below and happens in a single
/// mutator context (the session driver task or a test); methods are
/// synchronous and return the [`UpdateScope`] of slots they changed. Readers
/// share the snapshot through cheap `Arc` clones, so a reader is never
/// exposed to a half-applied update.
///
/// # Slots
///
/// - `connection_status`: latest status reported by the channel adapter
/// - `last_error`: most recent transport fault, cleared by the next accept
/// - `snapshot`: last accepted [`RealmSnapshot`] (presence and encounter are
///   projections of it, so the three always agree)
/// - `server_revision`: ordering token of the last accepted snapshot
pub struct RealmStore {
    connection: ConnectionStatus,
    last_error: Option<ChannelFault>,
    snapshot: Option<Arc<RealmSnapshot>>,
    server_revision: Option<Revision>,
    bus: StoreBus,
}

impl RealmStore {
    /// Empty store: disconnected, no error, no snapshot, no revision.
    pub fn new() -> Self {
        Self {
            connection: ConnectionStatus::default(),
            last_error: None,
            snapshot: None,
            server_revision: None,
            bus: StoreBus::new(),
        }
    }

    /// Store seeded with a snapshot, for tests and rehydration.
    ///
    /// The seed's own revision becomes the baseline for the gate.
    pub fn with_initial(snapshot: RealmSnapshot) -> Self {
        let mut store = Self::new();
        store.server_revision = snapshot.revision;
        store.snapshot = Some(Arc::new(snapshot));
        store
    }

    // ------------------------------------------------------------------
    // Write surface
    // ------------------------------------------------------------------

    /// Run an inbound snapshot through the gate and, on accept, swap the
    /// held state atomically.
    ///
    /// On reject nothing moves: no slot changes, no error is recorded, no
    /// subscriber is woken. Stale redelivery is an expected event, not a
    /// failure.
    ///
    /// On accept the snapshot is replaced as a unit, `server_revision`
    /// advances when the message carries a revision (a revision-less message
    /// has no ordering token and leaves it untouched), and a previously
    /// recorded fault is cleared (an accepted push means the channel is
    /// healthy again).
    pub fn apply_server_snapshot(&mut self, message: SnapshotMessage) -> UpdateScope {
        let incoming = message.revision.map(Revision);

        match gate::decide(self.server_revision, incoming) {
            GateDecision::Reject => {
                tracing::trace!(
                    held = ?self.server_revision,
                    incoming = ?incoming,
                    "dropping stale snapshot"
                );
                UpdateScope::empty()
            }
            GateDecision::Accept => {
                let next = Arc::new(reducer::reduce(message));
                let mut scope = UpdateScope::SNAPSHOT;

                let presence_changed = match &self.snapshot {
                    Some(previous) => previous.party_roster != next.party_roster,
                    None => true,
                };
                let encounter_changed = match &self.snapshot {
                    Some(previous) => previous.encounter != next.encounter,
                    None => true,
                };

                if incoming.is_some() {
                    self.server_revision = incoming;
                }
                self.snapshot = Some(next);

                if self.last_error.take().is_some() {
                    scope |= UpdateScope::FAULT;
                    self.bus.publish(Topic::Fault, StoreEvent::FaultCleared);
                }

                self.bus.publish(
                    Topic::Snapshot,
                    StoreEvent::SnapshotReplaced {
                        revision: self.server_revision,
                    },
                );
                if presence_changed {
                    scope |= UpdateScope::PRESENCE;
                    self.bus.publish(Topic::Presence, StoreEvent::PresenceChanged);
                }
                if encounter_changed {
                    scope |= UpdateScope::ENCOUNTER;
                    self.bus.publish(Topic::Encounter, StoreEvent::EncounterChanged);
                }

                tracing::debug!(revision = ?self.server_revision, ?scope, "accepted snapshot");
                scope
            }
        }
    }

    /// Record the latest connection status reported by the channel adapter.
    ///
    /// No transition legality is enforced here; the adapter is responsible
    /// for emitting coherent lifecycles and the store just records the most
    /// recent report.
    pub fn set_connection_status(&mut self, status: ConnectionStatus) -> UpdateScope {
        if self.connection == status {
            return UpdateScope::empty();
        }
        self.connection = status;
        self.bus
            .publish(Topic::Connection, StoreEvent::ConnectionChanged(status));
        UpdateScope::CONNECTION
    }

    /// Record a transport fault. Cleared implicitly by the next accepted
    /// snapshot.
    pub fn set_last_error(&mut self, fault: ChannelFault) -> UpdateScope {
        self.bus
            .publish(Topic::Fault, StoreEvent::FaultRecorded(fault.clone()));
        self.last_error = Some(fault);
        UpdateScope::FAULT
    }

    /// Return every slot to its initial value.
    ///
    /// Used when switching realms or signing out. Every topic receives a
    /// [`StoreEvent::Reset`].
    pub fn reset(&mut self) -> UpdateScope {
        self.connection = ConnectionStatus::default();
        self.last_error = None;
        self.snapshot = None;
        self.server_revision = None;
        self.bus.publish_all(StoreEvent::Reset);
        UpdateScope::ALL
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    pub fn connection_status(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn last_error(&self) -> Option<&ChannelFault> {
        self.last_error.as_ref()
    }

    /// The last accepted snapshot, shared by reference count.
    pub fn snapshot(&self) -> Option<Arc<RealmSnapshot>> {
        self.snapshot.clone()
    }

    /// Roster projection of the held snapshot.
    pub fn presence(&self) -> Option<&PartyRoster> {
        self.snapshot.as_deref().map(|s| &s.party_roster)
    }

    /// Encounter projection of the held snapshot.
    ///
    /// Tri-state on purpose: outer `None` means "no snapshot yet", inner
    /// `None` means "snapshot held, no active encounter". The explicit null
    /// from the wire survives to this boundary.
    pub fn encounter(&self) -> Option<Option<&Encounter>> {
        self.snapshot.as_deref().map(|s| s.encounter.as_ref())
    }

    /// Revision of the last accepted snapshot.
    pub fn server_revision(&self) -> Option<Revision> {
        self.server_revision
    }

    /// Subscribe to change notifications for one slot.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<StoreEvent> {
        self.bus.subscribe(topic)
    }
}

impl Default for RealmStore {
    fn default() -> Self {
        Self::new()
    }
}
