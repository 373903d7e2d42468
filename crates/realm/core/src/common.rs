use std::fmt;

/// Short join code identifying one realm (one collaborative session).
///
/// Codes are case-insensitive on the wire; they are normalized to uppercase
/// at construction so equality checks never depend on the sender's casing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RealmCode(String);

/// Errors produced when validating a realm code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RealmCodeError {
    #[error("realm code is empty")]
    Empty,

    #[error("realm code contains non-alphanumeric character {0:?}")]
    InvalidCharacter(char),
}

impl RealmCode {
    /// Normalize a code received from the server.
    ///
    /// The server is authoritative over code shape, so this only folds case.
    /// User-entered codes go through [`RealmCode::parse`] instead.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_ascii_uppercase())
    }

    /// Validate and normalize a raw code.
    pub fn parse(raw: &str) -> Result<Self, RealmCodeError> {
        if raw.is_empty() {
            return Err(RealmCodeError::Empty);
        }
        if let Some(bad) = raw.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(RealmCodeError::InvalidCharacter(bad));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RealmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key selecting the visual theme applied to a realm.
///
/// Opaque to the client core; the server owns the set of valid keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ThemeKey(pub String);

impl ThemeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ThemeKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a realm participant.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MemberId(pub String);

impl MemberId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a quest in the quest log.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QuestId(pub String);

impl QuestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonically increasing ordering token assigned by the server to each
/// snapshot it pushes.
///
/// Invariant: the store only ever holds the highest revision it has accepted,
/// so comparing two revisions is sufficient to detect stale redelivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Revision(pub u64);

impl Revision {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
