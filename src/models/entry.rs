//! Spending entry model
//!
//! An entry records one dated amount spent against a budget category. Its
//! serialized form is the on-disk record shape: amounts as decimal strings
//! and dates as epoch milliseconds.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::BudgetKey;
use super::ids::EntryId;
use super::money::{self, Money};

/// Largest amount a single entry may carry (one billion currency units)
pub const MAX_ENTRY_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// A single dated, categorized spending record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Category key this entry is charged to (not enforced)
    pub category: BudgetKey,

    /// Amount spent, always positive
    #[serde(with = "money::decimal_string")]
    pub amount: Money,

    /// When the spending was recorded
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

impl BudgetEntry {
    /// Create a new entry with a fresh id
    ///
    /// The date is truncated to whole milliseconds, the precision it is
    /// stored with.
    pub fn new(category: BudgetKey, amount: Money, date: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            category,
            amount,
            date: date.trunc_subsecs(3),
        }
    }

    /// Create a new entry stamped with the current time
    pub fn now(category: BudgetKey, amount: Money) -> Self {
        Self::new(category, amount, Utc::now())
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.amount.is_positive() {
            return Err(EntryValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_ENTRY_AMOUNT {
            return Err(EntryValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must be at most {} (got {})", MAX_ENTRY_AMOUNT, amount)
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}
