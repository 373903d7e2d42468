//! Channel transport abstraction.
//!
//! A transport owns the physical connection and its reconnection policy.
//! It surfaces decoded [`ChannelEvent`]s through a broadcast stream and
//! accepts [`ClientIntent`]s for delivery to the server. Everything above
//! this trait (driver, store, UI) is transport-agnostic.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::types::{ChannelEvent, ClientIntent};

/// Transport layer errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("channel is not connected")]
    NotConnected,

    #[error("channel is closed")]
    Closed,

    #[error("failed to send intent: {0}")]
    Send(String),

    #[error("failed to decode inbound frame: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend-specific error: {0}")]
    Backend(String),
}

/// A persistent real-time channel to the realm server.
///
/// Implementations must be cheaply cloneable or shared behind `Arc`; the
/// driver and the UI both hold references. The event stream is broadcast so
/// multiple consumers can observe lifecycle traffic independently.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    /// Establish the connection and start emitting events.
    async fn open(&self) -> Result<(), ChannelError>;

    /// Tear the connection down. Emits a `Disconnected` lifecycle event.
    async fn close(&self) -> Result<(), ChannelError>;

    /// Forward a client intent to the server.
    ///
    /// Intents are fire-and-forget at this layer; the server's answer, if
    /// any, arrives as a later snapshot push.
    async fn dispatch(&self, intent: ClientIntent) -> Result<(), ChannelError>;

    /// Subscribe to decoded inbound events.
    ///
    /// Each receiver sees every event from the moment of subscription; a
    /// lagging receiver drops the oldest events first.
    fn subscribe(&self) -> broadcast::Receiver<ChannelEvent>;
}
