//! Data structures for the frequency ledger.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Participant Id
// ---------------------------------------------------------------------------

/// Unique identifier for a participant within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub i64);

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Participant Record
// ---------------------------------------------------------------------------

/// Historical draw record for one participant.
///
/// On disk the win dates live under `dates` and the manual offset under
/// `balanceamento`. A missing or `null` alias reads as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alias: String,
    /// ISO `YYYY-MM-DD` dates, one per win, no duplicates.
    #[serde(rename = "dates", default)]
    pub win_dates: Vec<String>,
    /// Signed manual adjustment added to the win count.
    #[serde(rename = "balanceamento", default)]
    pub balancing_offset: i64,
}

impl ParticipantRecord {
    /// Create a record with no history, no alias and a zero offset.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            name: name.into(),
            alias: String::new(),
            win_dates: Vec::new(),
            balancing_offset: 0,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.balancing_offset = offset;
        self
    }

    /// Number of recorded wins plus the balancing offset.
    ///
    /// May be negative when the offset outweighs the history; the selector
    /// rejects negative frequencies. Saturates at the `i64` bounds, so an
    /// extreme stored offset never overflows.
    pub fn effective_frequency(&self) -> i64 {
        let wins = i64::try_from(self.win_dates.len()).unwrap_or(i64::MAX);
        wins.saturating_add(self.balancing_offset)
    }

    /// `name`, or `"name - alias"` when an alias is set.
    pub fn display_name(&self) -> String {
        if self.alias.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.alias)
        }
    }

    /// Most recent win date, by string order (ISO dates sort chronologically).
    pub fn last_win(&self) -> Option<&str> {
        self.win_dates.iter().max().map(String::as_str)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Win Update
// ---------------------------------------------------------------------------

/// Result of recording a win for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinUpdate {
    /// The date was appended; the effective frequency grew by one.
    Added,
    /// The date was already present; nothing changed.
    AlreadyRecorded,
}
