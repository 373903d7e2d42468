//! Shared bootstrap utilities for realm client front-ends.
//!
//! Provides configuration loading, telemetry setup, and the session wiring
//! that connects a channel transport to a reconciliation store. Front-ends
//! (terminal, web, tests) build a session here and then only talk to the
//! [`SessionHandle`].

pub mod builder;
pub mod config;
pub mod session;
pub mod telemetry;

pub use builder::{SessionBuilder, SessionSetup};
pub use config::ClientConfig;
pub use session::{SessionDriver, SessionHandle};
