use crate::common::MemberId;

/// One participant as reported by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    pub id: MemberId,
    pub name: String,
    /// Spectators watch the realm but never vote.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spectator: bool,
}

impl PartyMember {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            spectator: false,
        }
    }
}

/// The set of currently known participants, in server order.
///
/// The roster is a projection of the latest accepted snapshot; it is never
/// patched incrementally on the client.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyRoster {
    pub members: Vec<PartyMember>,
}

impl PartyRoster {
    pub fn new(members: Vec<PartyMember>) -> Self {
        Self { members }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Look up a member by identifier.
    pub fn member(&self, id: &MemberId) -> Option<&PartyMember> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Iterator over members eligible to vote.
    pub fn voters(&self) -> impl Iterator<Item = &PartyMember> {
        self.members.iter().filter(|m| !m.spectator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voters_excludes_spectators() {
        let mut watcher = PartyMember::new("m3", "Watcher");
        watcher.spectator = true;
        let roster = PartyRoster::new(vec![
            PartyMember::new("m1", "Aria"),
            PartyMember::new("m2", "Bram"),
            watcher,
        ]);

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.voters().count(), 2);
        assert!(roster.member(&MemberId::from("m3")).unwrap().spectator);
    }
}
