//! Budget category keys
//!
//! A category's name doubles as its identifier. Names are normalized to a
//! lowercase, space-free key so "Eating Out" and "eating-out" are the same
//! budget.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Maximum key length accepted
pub const MAX_KEY_LEN: usize = 50;

/// Categories created on a fresh install
pub const DEFAULT_BUDGETS: &[&str] = &["dining", "transport", "misc"];

/// Normalized budget category key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BudgetKey(String);

impl BudgetKey {
    /// Normalize user input into a key
    ///
    /// Trims, lowercases and joins whitespace-separated words with `-`.
    pub fn parse(input: &str) -> Result<Self, CategoryValidationError> {
        let key = input
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");

        if key.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = key.chars().count();
        if len > MAX_KEY_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The keys every new budget starts with
    pub fn defaults() -> Vec<Self> {
        DEFAULT_BUDGETS
            .iter()
            .map(|name| Self((*name).to_string()))
            .collect()
    }
}

impl fmt::Display for BudgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for BudgetKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for BudgetKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Older clients only replaced the first space, so stored keys are
        // normalized again on the way in.
        let raw = String::deserialize(deserializer)?;
        BudgetKey::parse(&raw).map_err(de::Error::custom)
    }
}

/// Validation errors for category names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Please enter a category name"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_KEY_LEN)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(BudgetKey::parse("Dining").unwrap().as_str(), "dining");
        assert_eq!(
            BudgetKey::parse("  Eating   Out  Fast ").unwrap().as_str(),
            "eating-out-fast"
        );
        assert_eq!(BudgetKey::parse("eating-out").unwrap().as_str(), "eating-out");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(BudgetKey::parse(""), Err(CategoryValidationError::EmptyName));
        assert_eq!(BudgetKey::parse("   "), Err(CategoryValidationError::EmptyName));
    }

    #[test]
    fn test_name_too_long() {
        let long = "x".repeat(MAX_KEY_LEN + 1);
        assert_eq!(
            BudgetKey::parse(&long),
            Err(CategoryValidationError::NameTooLong(MAX_KEY_LEN + 1))
        );
    }

    #[test]
    fn test_defaults() {
        let keys: Vec<String> = BudgetKey::defaults()
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(keys, vec!["dining", "transport", "misc"]);
    }

    #[test]
    fn test_deserialize_normalizes_legacy_keys() {
        let key: BudgetKey = serde_json::from_str("\"eating-out fast\"").unwrap();
        assert_eq!(key.as_str(), "eating-out-fast");
        assert!(serde_json::from_str::<BudgetKey>("\"\"").is_err());
    }
}
