//! Mock channel transport for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::traits::{ChannelError, ChannelTransport};
use crate::types::{ChannelEvent, ClientIntent, ConnectionEvent, SnapshotMessage};

const EVENT_CAPACITY: usize = 64;

/// Mock transport for testing without a server.
///
/// Tests script inbound traffic with [`MockChannel::push_snapshot`] and
/// [`MockChannel::emit`], and assert on outbound intents via
/// [`MockChannel::sent_intents`].
#[derive(Clone)]
pub struct MockChannel {
    events: broadcast::Sender<ChannelEvent>,
    sent: Arc<Mutex<Vec<ClientIntent>>>,
    open: Arc<AtomicBool>,
}

impl MockChannel {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            events,
            sent: Arc::new(Mutex::new(Vec::new())),
            open: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Emit an arbitrary channel event to all subscribers.
    pub fn emit(&self, event: ChannelEvent) {
        // Send errors only mean "no subscribers yet", which tests may do on
        // purpose while scripting.
        let _ = self.events.send(event);
    }

    /// Emit a lifecycle signal.
    pub fn emit_lifecycle(&self, event: ConnectionEvent) {
        self.emit(ChannelEvent::Lifecycle(event));
    }

    /// Push a decoded snapshot as if the server had sent it.
    pub fn push_snapshot(&self, message: SnapshotMessage) {
        self.emit(ChannelEvent::Snapshot(message));
    }

    /// Decode a JSON frame and push it, mirroring what a real transport's
    /// read loop does.
    pub fn push_json(&self, frame: &str) -> Result<(), ChannelError> {
        let message: SnapshotMessage = serde_json::from_str(frame)?;
        self.push_snapshot(message);
        Ok(())
    }

    /// Intents dispatched so far, in order.
    pub fn sent_intents(&self) -> Vec<ClientIntent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelTransport for MockChannel {
    async fn open(&self) -> Result<(), ChannelError> {
        self.open.store(true, Ordering::SeqCst);
        self.emit_lifecycle(ConnectionEvent::Connecting);
        self.emit_lifecycle(ConnectionEvent::Connected);
        Ok(())
    }

    async fn close(&self) -> Result<(), ChannelError> {
        self.open.store(false, Ordering::SeqCst);
        self.emit_lifecycle(ConnectionEvent::Disconnected);
        Ok(())
    }

    async fn dispatch(&self, intent: ClientIntent) -> Result<(), ChannelError> {
        if !self.is_open() {
            return Err(ChannelError::NotConnected);
        }
        self.sent.lock().unwrap().push(intent);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChannelEvent> {
        self.events.subscribe()
    }
}
