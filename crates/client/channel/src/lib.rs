//! Channel adapter abstraction for the realm client.
//!
//! This crate defines the seam between the physical real-time channel
//! (websocket, SSE, whatever a deployment uses) and the reconciliation
//! store:
//! - [`ChannelTransport`]: the async trait a concrete transport implements
//! - [`ChannelEvent`]: decoded inbound traffic (lifecycle signals + snapshots)
//! - [`SnapshotMessage`]: the wire shape of a server-pushed realm snapshot
//! - [`ClientIntent`]: outbound mutation requests dispatched by the UI
//! - [`MockChannel`]: in-memory transport for tests
//!
//! No network code lives here; concrete transports are separate crates that
//! only need to produce [`ChannelEvent`]s and consume [`ClientIntent`]s.

pub mod mock;
pub mod traits;
pub mod types;

pub use mock::MockChannel;
pub use traits::{ChannelError, ChannelTransport};
pub use types::{
    ChannelEvent, ChannelFault, ClientIntent, ConnectionEvent, ConnectionStatus,
    EncounterMessage, FaultKind, MemberMessage, QuestLogMessage, QuestMessage, RosterMessage,
    SettingsMessage, SnapshotMessage,
};
