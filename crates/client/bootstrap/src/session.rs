//! Session wiring: the pump between a channel transport and the store.
//!
//! The [`SessionDriver`] is the single mutator of the store. It consumes
//! decoded channel events, maps lifecycle signals onto connection status and
//! fault slots, and feeds snapshot pushes through the store's revision gate.
//! Everything else (UI widgets, tests) reads through the cloneable
//! [`SessionHandle`].

use std::sync::{Arc, RwLock};

use anyhow::Result;
use client_channel_core::{
    ChannelEvent, ChannelFault, ChannelTransport, ClientIntent, ConnectionEvent,
    ConnectionStatus,
};
use client_store::{RealmStore, StoreEvent, Topic, UpdateScope};
use realm_core::{Encounter, PartyRoster, RealmCode, RealmSnapshot, Revision};
use tokio::sync::broadcast;

use crate::config::ClientConfig;

/// Cloneable facade over one live session.
///
/// Reads are synchronous and copy data out of the store lock; the lock is
/// never held across an await. Writes all go through the driver task except
/// [`SessionHandle::reset`] and [`SessionHandle::switch_realm`], which are
/// deliberate user actions.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<RwLock<RealmStore>>,
    transport: Arc<dyn ChannelTransport>,
}

impl SessionHandle {
    pub fn new(store: RealmStore, transport: Arc<dyn ChannelTransport>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            transport,
        }
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    pub fn connection_status(&self) -> ConnectionStatus {
        self.store.read().unwrap().connection_status()
    }

    pub fn last_error(&self) -> Option<ChannelFault> {
        self.store.read().unwrap().last_error().cloned()
    }

    pub fn snapshot(&self) -> Option<Arc<RealmSnapshot>> {
        self.store.read().unwrap().snapshot()
    }

    pub fn presence(&self) -> Option<PartyRoster> {
        self.store.read().unwrap().presence().cloned()
    }

    /// Tri-state like the store: `None` = no snapshot yet, `Some(None)` =
    /// snapshot held with no active encounter.
    pub fn encounter(&self) -> Option<Option<Encounter>> {
        self.store
            .read()
            .unwrap()
            .encounter()
            .map(|e| e.cloned())
    }

    pub fn server_revision(&self) -> Option<Revision> {
        self.store.read().unwrap().server_revision()
    }

    /// Subscribe to change notifications for one store slot.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<StoreEvent> {
        self.store.read().unwrap().subscribe(topic)
    }

    // ------------------------------------------------------------------
    // Write surface
    // ------------------------------------------------------------------

    /// Forward a UI intent to the server. The store is untouched; the
    /// server's answer arrives as a later snapshot.
    pub async fn dispatch(&self, intent: ClientIntent) -> Result<()> {
        tracing::debug!(%intent, "dispatching client intent");
        self.transport.dispatch(intent).await?;
        Ok(())
    }

    /// Drop all held state (sign-out, leaving a realm).
    pub fn reset(&self) {
        self.store.write().unwrap().reset();
    }

    /// Move this client to a different realm.
    ///
    /// Resets every slot first so the old realm's revision baseline cannot
    /// gate out the new realm's snapshots, then announces the join.
    pub async fn switch_realm(&self, realm_code: RealmCode, name: String) -> Result<()> {
        self.reset();
        self.dispatch(ClientIntent::JoinRealm {
            realm_code: realm_code.as_str().to_string(),
            name,
        })
        .await
    }

    fn apply(&self, event: ChannelEvent) -> UpdateScope {
        let mut store = self.store.write().unwrap();
        match event {
            ChannelEvent::Lifecycle(lifecycle) => {
                let mut scope = store.set_connection_status(lifecycle.status());
                if let ConnectionEvent::Faulted(fault) = lifecycle {
                    tracing::warn!(%fault, "channel reported fault");
                    scope |= store.set_last_error(fault);
                }
                scope
            }
            ChannelEvent::Snapshot(message) => store.apply_server_snapshot(message),
        }
    }
}

/// Owns the channel event stream and pumps it into the store.
///
/// Run this on its own task: [`SessionDriver::run`] loops until the
/// transport drops its event stream.
pub struct SessionDriver {
    handle: SessionHandle,
    events: broadcast::Receiver<ChannelEvent>,
    config: ClientConfig,
}

impl SessionDriver {
    pub fn new(handle: SessionHandle, config: ClientConfig) -> Self {
        let events = handle.transport.subscribe();
        Self {
            handle,
            events,
            config,
        }
    }

    /// Pump channel events into the store until the transport closes.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("session driver started");
        loop {
            match self.events.recv().await {
                Ok(event) => self.handle_event(event).await,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    // Snapshots are whole-state, so dropped events heal with
                    // the next push; just record the gap.
                    tracing::warn!(missed, "driver lagged behind channel events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::info!("channel event stream closed, driver stopping");
        Ok(())
    }

    async fn handle_event(&self, event: ChannelEvent) {
        let announce = matches!(
            event,
            ChannelEvent::Lifecycle(ConnectionEvent::Connected)
        ) && self.config.can_auto_join();

        let scope = self.handle.apply(event);
        if !scope.is_noop() {
            tracing::trace!(?scope, "store updated");
        }

        if announce {
            let intent = ClientIntent::JoinRealm {
                realm_code: self.config.realm_code.clone().unwrap_or_default(),
                name: self.config.display_name.clone().unwrap_or_default(),
            };
            if let Err(error) = self.handle.dispatch(intent).await {
                tracing::warn!(%error, "failed to announce join after connect");
            }
        }
    }
}
