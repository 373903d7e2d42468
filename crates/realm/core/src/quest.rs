use crate::common::QuestId;

/// One item to be estimated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    /// Agreed estimate, present once the party has settled on one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub estimate: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed: bool,
}

impl Quest {
    pub fn new(id: impl Into<QuestId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimate: None,
            completed: false,
        }
    }
}

/// Ordered backlog of quests for the realm.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestLog {
    pub quests: Vec<Quest>,
}

impl QuestLog {
    pub fn new(quests: Vec<Quest>) -> Self {
        Self { quests }
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn quest(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| &q.id == id)
    }

    /// First quest that has not been completed, if any.
    pub fn next_open(&self) -> Option<&Quest> {
        self.quests.iter().find(|q| !q.completed)
    }
}
