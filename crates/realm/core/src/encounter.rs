use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::common::{MemberId, QuestId};

/// A single cast vote.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", tag = "kind", content = "card"))]
pub enum Vote {
    /// A card from the realm's deck, carried as the card label.
    Card(String),
    /// Explicit abstention (only legal when the realm allows it).
    Abstain,
}

/// The currently active estimation round.
///
/// Absent from the snapshot entirely when no round is running; the client
/// must preserve that absence rather than substituting an empty encounter.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Encounter {
    /// Quest under estimation, if the round is tied to one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub quest: Option<QuestId>,
    /// Votes keyed by member. Ordered map so iteration is deterministic.
    #[cfg_attr(feature = "serde", serde(default))]
    pub votes: BTreeMap<MemberId, Vote>,
    /// Whether votes have been turned face-up.
    #[cfg_attr(feature = "serde", serde(default))]
    pub revealed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub started_at: Option<DateTime<Utc>>,
}

/// Aggregated view of an encounter's votes.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct VoteTally {
    /// Count per card label, in label order.
    pub cards: BTreeMap<String, usize>,
    pub abstentions: usize,
}

impl Encounter {
    pub fn vote_of(&self, member: &MemberId) -> Option<&Vote> {
        self.votes.get(member)
    }

    pub fn has_voted(&self, member: &MemberId) -> bool {
        self.votes.contains_key(member)
    }

    /// Tally cast votes. Meaningful to display only once `revealed` is set.
    pub fn tally(&self) -> VoteTally {
        let mut tally = VoteTally::default();
        for vote in self.votes.values() {
            match vote {
                Vote::Card(label) => *tally.cards.entry(label.clone()).or_insert(0) += 1,
                Vote::Abstain => tally.abstentions += 1,
            }
        }
        tally
    }
}
