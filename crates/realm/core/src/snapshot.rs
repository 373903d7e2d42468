use crate::common::{RealmCode, Revision, ThemeKey};
use crate::encounter::Encounter;
use crate::quest::QuestLog;
use crate::roster::PartyRoster;
use crate::settings::RealmSettings;

/// Canonical whole-state projection of one realm at one revision.
///
/// A snapshot is always replaced as a unit: the store swaps one value for
/// another and never patches fields in place, so every derived read-view
/// (presence, encounter) updates together.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RealmSnapshot {
    pub realm_code: RealmCode,
    pub theme: ThemeKey,
    pub settings: RealmSettings,
    pub party_roster: PartyRoster,
    pub quest_log: QuestLog,
    /// `None` while no estimation round is active.
    pub encounter: Option<Encounter>,
    /// Ordering token; optional on the wire, required for staleness checks.
    pub revision: Option<Revision>,
}

impl RealmSnapshot {
    /// Minimal snapshot for a realm with nothing going on yet.
    pub fn empty(realm_code: RealmCode) -> Self {
        Self {
            realm_code,
            theme: ThemeKey::from("default"),
            settings: RealmSettings::default(),
            party_roster: PartyRoster::default(),
            quest_log: QuestLog::default(),
            encounter: None,
            revision: None,
        }
    }

    /// Whether an estimation round is currently running.
    pub fn encounter_active(&self) -> bool {
        self.encounter.is_some()
    }
}
