//! Fine-grained change tracking for store operations.

use bitflags::bitflags;

bitflags! {
    /// Tracks which store slots an operation changed.
    ///
    /// Subscribers use the per-topic bus rather than these flags directly,
    /// but every mutating store operation also returns its scope so callers
    /// (and tests) can observe exactly what moved.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UpdateScope: u8 {
        /// The held snapshot was replaced (and the server revision possibly
        /// advanced with it).
        const SNAPSHOT   = 0b00001;

        /// The party roster projection changed.
        const PRESENCE   = 0b00010;

        /// The encounter projection changed.
        const ENCOUNTER  = 0b00100;

        /// The connection status changed.
        const CONNECTION = 0b01000;

        /// The last-error slot changed (recorded or cleared).
        const FAULT      = 0b10000;

        /// Every slot changed (reset).
        const ALL = Self::SNAPSHOT.bits()
                  | Self::PRESENCE.bits()
                  | Self::ENCOUNTER.bits()
                  | Self::CONNECTION.bits()
                  | Self::FAULT.bits();
    }
}

impl UpdateScope {
    /// True when the operation changed nothing observable.
    pub fn is_noop(&self) -> bool {
        self.is_empty()
    }
}

impl Default for UpdateScope {
    fn default() -> Self {
        Self::empty()
    }
}
