//! Domain model for a collaborative estimation realm.
//!
//! Pure data types shared by the channel and store layers: the whole-state
//! [`RealmSnapshot`] plus its sub-states (settings, party roster, quest log,
//! encounter). No I/O, no async, no transport concerns.

pub mod common;
pub mod encounter;
pub mod quest;
pub mod roster;
pub mod settings;
pub mod snapshot;

pub use common::{MemberId, QuestId, RealmCode, RealmCodeError, Revision, ThemeKey};
pub use encounter::{Encounter, Vote, VoteTally};
pub use quest::{Quest, QuestLog};
pub use roster::{PartyMember, PartyRoster};
pub use settings::{DeckKind, RealmSettings};
pub use snapshot::RealmSnapshot;
