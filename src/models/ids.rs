//! Entry identifiers
//!
//! New ids are random UUIDs in their compact (simple) form. Records written by
//! older clients carry arbitrary short string ids, so any non-empty string is
//! accepted when reading.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of leading characters shown in listings
pub const SHORT_ID_LEN: usize = 8;

/// Unique identifier of a spending entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing id string
    ///
    /// Returns `None` for an empty (or all-whitespace) id.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(Self(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters used for compact display
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_ID_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Whether this id starts with the given (non-empty) prefix
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.0.starts_with(prefix)
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        EntryId::parse(&raw).ok_or_else(|| de::Error::custom("entry id cannot be empty"))
    }
}
