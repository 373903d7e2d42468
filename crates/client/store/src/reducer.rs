//! Snapshot reducer: turns an accepted wire message into a fresh domain
//! snapshot.
//!
//! Each accepted message is a complete replacement of the domain state, not
//! a patch. The reducer therefore never reads the previous snapshot; it
//! builds a brand-new value from the message alone. If incremental events
//! are ever added, this module must synthesize a full snapshot from the
//! previous one plus the delta, so the store boundary keeps its
//! replace-not-merge contract.

use client_channel_core::{
    EncounterMessage, MemberMessage, QuestMessage, SettingsMessage, SnapshotMessage,
};
use realm_core::{
    Encounter, MemberId, PartyMember, PartyRoster, Quest, QuestId, QuestLog, RealmCode,
    RealmSettings, RealmSnapshot, Revision, ThemeKey,
};

/// Build the next snapshot from an accepted message.
///
/// Takes the message by value; nothing is mutated and nothing is shared with
/// the previous snapshot. An absent encounter stays absent; it is never
/// coalesced into a default encounter.
pub fn reduce(message: SnapshotMessage) -> RealmSnapshot {
    RealmSnapshot {
        realm_code: RealmCode::new(&message.realm_code),
        theme: ThemeKey(message.theme_key),
        settings: reduce_settings(message.settings),
        party_roster: reduce_roster(message.party_roster.members),
        quest_log: reduce_quest_log(message.quest_log.quests),
        encounter: message.encounter.map(reduce_encounter),
        revision: message.revision.map(Revision),
    }
}

fn reduce_settings(settings: SettingsMessage) -> RealmSettings {
    RealmSettings {
        deck: settings.deck_type,
        auto_reveal: settings.auto_reveal,
        allow_abstain: settings.allow_abstain,
        hide_vote_counts: settings.hide_vote_counts,
        allow_emoji_reactions: settings.allow_emoji_reactions,
    }
}

fn reduce_roster(members: Vec<MemberMessage>) -> PartyRoster {
    PartyRoster::new(
        members
            .into_iter()
            .map(|member| PartyMember {
                id: MemberId(member.id),
                name: member.name,
                spectator: member.spectator,
            })
            .collect(),
    )
}

fn reduce_quest_log(quests: Vec<QuestMessage>) -> QuestLog {
    QuestLog::new(
        quests
            .into_iter()
            .map(|quest| Quest {
                id: QuestId(quest.id),
                title: quest.title,
                estimate: quest.estimate,
                completed: quest.completed,
            })
            .collect(),
    )
}

fn reduce_encounter(encounter: EncounterMessage) -> Encounter {
    Encounter {
        quest: encounter.quest_id.map(QuestId),
        votes: encounter
            .votes
            .into_iter()
            .map(|(member, vote)| (MemberId(member), vote))
            .collect(),
        revealed: encounter.revealed,
        started_at: encounter.started_at,
    }
}
