use strum::{Display, EnumString};

/// Card deck used for estimation in this realm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum DeckKind {
    /// 0, 1, 2, 3, 5, 8, 13, 21, ...
    #[default]
    Fibonacci,
    /// 1, 2, 3, 4, 5, ...
    Sequential,
    /// 1, 2, 4, 8, 16, ...
    PowersOfTwo,
    /// XS, S, M, L, XL.
    TShirt,
}

/// Per-realm behavioral settings pushed by the server.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealmSettings {
    /// Deck used when casting votes.
    pub deck: DeckKind,
    /// Reveal the encounter automatically once every participant has voted.
    pub auto_reveal: bool,
    /// Allow members to cast an explicit abstain vote.
    pub allow_abstain: bool,
    /// Hide the running count of cast votes until reveal.
    pub hide_vote_counts: bool,
    /// Allow members to send emoji reactions during an encounter.
    pub allow_emoji_reactions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn deck_kind_round_trips_through_strings() {
        assert_eq!(DeckKind::PowersOfTwo.to_string(), "powers-of-two");
        assert_eq!(DeckKind::from_str("t-shirt").unwrap(), DeckKind::TShirt);
    }

    #[test]
    fn default_settings_are_conservative() {
        let settings = RealmSettings::default();
        assert_eq!(settings.deck, DeckKind::Fibonacci);
        assert!(!settings.auto_reveal);
        assert!(!settings.hide_vote_counts);
    }
}
