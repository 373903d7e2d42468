//! Builds the store, session handle, and driver used by front-ends.

use std::sync::Arc;

use anyhow::{Context, Result};
use client_channel_core::ChannelTransport;
use client_store::RealmStore;
use realm_core::RealmSnapshot;

use crate::config::ClientConfig;
use crate::session::{SessionDriver, SessionHandle};

/// Builder assembling a session from a transport and configuration.
///
/// The transport is required and injected so tests can wire a mock; the
/// initial store state is optional and defaults to the empty store.
pub struct SessionBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn ChannelTransport>>,
    initial: Option<RealmSnapshot>,
}

impl SessionBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            initial: None,
        }
    }

    /// Provide the channel transport (required).
    pub fn transport(mut self, transport: impl ChannelTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Provide an already-shared transport.
    pub fn transport_arc(mut self, transport: Arc<dyn ChannelTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Seed the store with a snapshot (rehydration, tests).
    pub fn initial_snapshot(mut self, snapshot: RealmSnapshot) -> Self {
        self.initial = Some(snapshot);
        self
    }

    /// Assemble the session.
    ///
    /// # Errors
    ///
    /// Fails fast when no transport was provided.
    pub fn build(self) -> Result<SessionSetup> {
        let transport = self
            .transport
            .context("SessionBuilder requires a transport")?;

        let store = match self.initial {
            Some(snapshot) => RealmStore::with_initial(snapshot),
            None => RealmStore::new(),
        };

        let handle = SessionHandle::new(store, transport);
        let driver = SessionDriver::new(handle.clone(), self.config.clone());

        Ok(SessionSetup {
            config: self.config,
            handle,
            driver,
        })
    }
}

/// Assembled session parts.
///
/// Spawn `driver.run()` on a task, hand `handle` to the UI.
pub struct SessionSetup {
    pub config: ClientConfig,
    pub handle: SessionHandle,
    pub driver: SessionDriver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_transport_fails_fast() {
        let result = SessionBuilder::new(ClientConfig::default()).build();
        assert!(result.is_err());
    }
}
