use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// One of the three triage columns on the board
///
/// Serializes as the wire name; deserializes with the same lenient rules as
/// [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Raised,
    InProgress,
    Done,
}

impl Bucket {
    /// All buckets in column order
    pub const ALL: [Bucket; 3] = [Bucket::Raised, Bucket::InProgress, Bucket::Done];

    /// Position of the bucket's column, left to right
    pub fn index(self) -> usize {
        match self {
            Self::Raised => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Name carried by drop zones ("raised", "inProgress", "done")
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Raised => "raised",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    /// Column heading shown above the cards
    pub fn heading(self) -> &'static str {
        match self {
            Self::Raised => "Tickets Raised",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// DOM id of the column's drop zone
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Raised => "raised-column",
            Self::InProgress => "in-progress-column",
            Self::Done => "done-column",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raised => write!(f, "Raised"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Done => write!(f, "Done"),
        }
    }
}

impl FromStr for Bucket {
    type Err = crate::error::TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "raised" => Ok(Self::Raised),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(crate::error::TriageError::InvalidBucket(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Bucket {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
