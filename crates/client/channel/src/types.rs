//! Wire and lifecycle types crossing the channel boundary.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use realm_core::{DeckKind, QuestId, RealmSettings, Vote};
use serde::{Deserialize, Serialize};
use strum::Display;

// ============================================================================
// Connection lifecycle
// ============================================================================

/// Connection state as last reported by the transport.
///
/// Exactly one value at a time; the store records whatever the transport
/// reports without enforcing transition legality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Errored,
}

/// Failure kinds a transport can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FaultKind {
    /// The connection dropped after being established.
    ConnectionLost,
    /// The server refused or never completed the handshake.
    Handshake,
    /// Inbound traffic violated the protocol (undecodable frame).
    Protocol,
}

/// A recorded transport failure.
///
/// Faults are plain values: they are stored and rendered, never thrown.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct ChannelFault {
    pub kind: FaultKind,
    pub detail: String,
}

impl ChannelFault {
    pub fn new(kind: FaultKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Lifecycle signal emitted by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connecting,
    Connected,
    Reconnecting,
    Disconnected,
    Faulted(ChannelFault),
}

impl ConnectionEvent {
    /// The status the store should record for this signal.
    pub fn status(&self) -> ConnectionStatus {
        match self {
            ConnectionEvent::Connecting => ConnectionStatus::Connecting,
            ConnectionEvent::Connected => ConnectionStatus::Connected,
            ConnectionEvent::Reconnecting => ConnectionStatus::Reconnecting,
            ConnectionEvent::Disconnected => ConnectionStatus::Disconnected,
            ConnectionEvent::Faulted(_) => ConnectionStatus::Errored,
        }
    }
}

// ============================================================================
// Inbound messages
// ============================================================================

/// Decoded inbound traffic delivered to the session driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelEvent {
    Lifecycle(ConnectionEvent),
    Snapshot(SnapshotMessage),
}

/// Wire shape of a server-pushed whole-realm snapshot.
///
/// Field names follow the server's camelCase JSON. `revision` is optional on
/// the wire: a revision-less push is a full authoritative resync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMessage {
    pub realm_code: String,
    pub theme_key: String,
    pub settings: SettingsMessage,
    pub party_roster: RosterMessage,
    pub quest_log: QuestLogMessage,
    /// Explicitly nullable: `null` means "no active encounter".
    #[serde(default)]
    pub encounter: Option<EncounterMessage>,
    #[serde(default)]
    pub revision: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsMessage {
    #[serde(default)]
    pub deck_type: DeckKind,
    #[serde(default)]
    pub auto_reveal: bool,
    #[serde(default)]
    pub allow_abstain: bool,
    #[serde(default)]
    pub hide_vote_counts: bool,
    #[serde(default)]
    pub allow_emoji_reactions: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RosterMessage {
    #[serde(default)]
    pub members: Vec<MemberMessage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMessage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub spectator: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestLogMessage {
    #[serde(default)]
    pub quests: Vec<QuestMessage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestMessage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub estimate: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EncounterMessage {
    #[serde(default)]
    pub quest_id: Option<String>,
    /// Votes keyed by member id.
    #[serde(default)]
    pub votes: BTreeMap<String, Vote>,
    #[serde(default)]
    pub revealed: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl SnapshotMessage {
    /// Minimal message for a quiet realm, useful as a test fixture base.
    pub fn bare(realm_code: &str) -> Self {
        Self {
            realm_code: realm_code.to_string(),
            theme_key: "default".to_string(),
            settings: SettingsMessage::default(),
            party_roster: RosterMessage::default(),
            quest_log: QuestLogMessage::default(),
            encounter: None,
            revision: None,
        }
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = Some(revision);
        self
    }
}

// ============================================================================
// Outbound intents
// ============================================================================

/// Mutation request dispatched by the UI toward the server.
///
/// Intents are forwarded to the transport verbatim; the client never applies
/// them locally; the resulting state change arrives as the next snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "intent")]
pub enum ClientIntent {
    JoinRealm { realm_code: String, name: String },
    LeaveRealm,
    CastVote { vote: Vote },
    RetractVote,
    StartEncounter { quest_id: Option<QuestId> },
    RevealEncounter,
    CompleteQuest { quest_id: QuestId, estimate: String },
    AddQuest { title: String },
    UpdateSettings { settings: RealmSettings },
    SendReaction { emoji: String },
}

impl fmt::Display for ClientIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClientIntent::JoinRealm { .. } => "join-realm",
            ClientIntent::LeaveRealm => "leave-realm",
            ClientIntent::CastVote { .. } => "cast-vote",
            ClientIntent::RetractVote => "retract-vote",
            ClientIntent::StartEncounter { .. } => "start-encounter",
            ClientIntent::RevealEncounter => "reveal-encounter",
            ClientIntent::CompleteQuest { .. } => "complete-quest",
            ClientIntent::AddQuest { .. } => "add-quest",
            ClientIntent::UpdateSettings { .. } => "update-settings",
            ClientIntent::SendReaction { .. } => "send-reaction",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_message_decodes_from_camel_case_json() {
        let json = r#"{
            "realmCode": "abcd",
            "themeKey": "dungeon",
            "settings": {
                "deckType": "fibonacci",
                "autoReveal": true,
                "allowAbstain": true,
                "hideVoteCounts": false,
                "allowEmojiReactions": true
            },
            "partyRoster": { "members": [ { "id": "m1", "name": "Aria" } ] },
            "questLog": { "quests": [ { "id": "q1", "title": "First quest" } ] },
            "encounter": null,
            "revision": 7
        }"#;

        let message: SnapshotMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.realm_code, "abcd");
        assert_eq!(message.settings.deck_type, DeckKind::Fibonacci);
        assert!(message.settings.auto_reveal);
        assert_eq!(message.party_roster.members[0].name, "Aria");
        assert_eq!(message.encounter, None);
        assert_eq!(message.revision, Some(7));
    }

    #[test]
    fn absent_revision_and_encounter_decode_to_none() {
        let json = r#"{
            "realmCode": "WXYZ",
            "themeKey": "default",
            "settings": {},
            "partyRoster": {},
            "questLog": {}
        }"#;

        let message: SnapshotMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.revision, None);
        assert_eq!(message.encounter, None);
    }

    #[test]
    fn encounter_votes_decode_with_tagged_variants() {
        let json = r#"{
            "questId": null,
            "votes": {
                "m1": { "kind": "card", "card": "5" },
                "m2": { "kind": "abstain" }
            },
            "revealed": false
        }"#;

        let encounter: EncounterMessage = serde_json::from_str(json).unwrap();
        assert_eq!(encounter.votes["m1"], Vote::Card("5".into()));
        assert_eq!(encounter.votes["m2"], Vote::Abstain);
    }

    #[test]
    fn faulted_event_maps_to_errored_status() {
        let event = ConnectionEvent::Faulted(ChannelFault::new(
            FaultKind::ConnectionLost,
            "keepalive timed out",
        ));
        assert_eq!(event.status(), ConnectionStatus::Errored);
        assert_eq!(ConnectionEvent::Reconnecting.status(), ConnectionStatus::Reconnecting);
    }
}
