use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a participant in a group.
///
/// Identifiers are expected to be unique within one balance snapshot.
/// The simplifier does not deduplicate them: two entries with the same id
/// are treated as two independent accounts.
///
/// # Examples
///
/// ```
/// use debt_simplifier::core::participant::ParticipantId;
///
/// let john = ParticipantId::new("user-1");
/// let jane = ParticipantId::new("user-2");
/// assert_ne!(john, jane);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
