//! Versioned record formats
//!
//! Two records make up the durable state:
//!
//! - `budgets`: `{"schema_version": 1, "budgets": {"dining": 12.5, ...}}`
//! - `entries`: `{"schema_version": 1, "entries": [{"id", "category", "amount", "date"}]}`
//!
//! The browser build wrote the bare object / bare array without a version
//! wrapper. Those legacy shapes are still accepted and are rewritten in the
//! versioned form on the next save. Decoding validates every value; anything
//! that does not fit the domain types is rejected as a storage error.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BudgetEntry, BudgetKey, Money};

/// Current record schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Record key holding category totals
pub const BUDGETS_KEY: &str = "budgets";

/// Record key holding the entry list
pub const ENTRIES_KEY: &str = "entries";

/// Category totals in presentation order
pub type Categories = IndexMap<BudgetKey, Money>;

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBudgets {
    Versioned {
        schema_version: u32,
        budgets: IndexMap<String, Option<f64>>,
    },
    Legacy(IndexMap<String, Option<f64>>),
}

#[derive(Serialize)]
struct BudgetsRecord<'a> {
    schema_version: u32,
    budgets: IndexMap<&'a str, f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntries {
    Versioned {
        schema_version: u32,
        entries: Vec<BudgetEntry>,
    },
    Legacy(Vec<BudgetEntry>),
}

#[derive(Serialize)]
struct EntriesRecord<'a> {
    schema_version: u32,
    entries: &'a [BudgetEntry],
}

fn check_version(key: &str, version: u32) -> SpendwiseResult<()> {
    if version > SCHEMA_VERSION {
        return Err(SpendwiseError::Storage(format!(
            "Record '{}' has schema version {}, newer than supported version {}",
            key, version, SCHEMA_VERSION
        )));
    }
    Ok(())
}

/// Encode category totals as a versioned `budgets` record
pub fn encode_budgets(categories: &Categories) -> SpendwiseResult<Value> {
    let record = BudgetsRecord {
        schema_version: SCHEMA_VERSION,
        budgets: categories
            .iter()
            .map(|(key, total)| (key.as_str(), total.to_number()))
            .collect(),
    };
    serde_json::to_value(record)
        .map_err(|e| SpendwiseError::Storage(format!("Failed to encode budgets: {}", e)))
}

/// Decode and validate a `budgets` record
pub fn decode_budgets(value: Value) -> SpendwiseResult<Categories> {
    let stored: StoredBudgets = serde_json::from_value(value).map_err(|e| {
        SpendwiseError::Storage(format!("Malformed '{}' record: {}", BUDGETS_KEY, e))
    })?;

    let raw = match stored {
        StoredBudgets::Versioned {
            schema_version,
            budgets,
        } => {
            check_version(BUDGETS_KEY, schema_version)?;
            budgets
        }
        StoredBudgets::Legacy(budgets) => {
            info!("migrating unversioned '{}' record", BUDGETS_KEY);
            budgets
        }
    };

    let mut categories = Categories::with_capacity(raw.len());
    for (name, total) in raw {
        let key = BudgetKey::parse(&name).map_err(|e| {
            SpendwiseError::Storage(format!("Invalid budget name '{}': {}", name, e))
        })?;

        // Older clients stored NaN totals (serialized as null) after
        // charging an entry to a missing category.
        let total = match total {
            None => {
                warn!(budget = %key, "stored total is null, resetting to zero");
                Money::zero()
            }
            Some(number) => Money::from_number(number)
                .filter(|m| !m.is_negative())
                .ok_or_else(|| {
                    SpendwiseError::Storage(format!(
                        "Invalid total {} for budget '{}'",
                        number, key
                    ))
                })?,
        };

        // Distinct legacy names can normalize to the same key
        *categories.entry(key).or_default() += total;
    }

    Ok(categories)
}

/// Encode the entry list as a versioned `entries` record
pub fn encode_entries(entries: &[BudgetEntry]) -> SpendwiseResult<Value> {
    let record = EntriesRecord {
        schema_version: SCHEMA_VERSION,
        entries,
    };
    serde_json::to_value(record)
        .map_err(|e| SpendwiseError::Storage(format!("Failed to encode entries: {}", e)))
}

/// Decode and validate an `entries` record
pub fn decode_entries(value: Value) -> SpendwiseResult<Vec<BudgetEntry>> {
    let stored: StoredEntries = serde_json::from_value(value).map_err(|e| {
        SpendwiseError::Storage(format!("Malformed '{}' record: {}", ENTRIES_KEY, e))
    })?;

    let entries = match stored {
        StoredEntries::Versioned {
            schema_version,
            entries,
        } => {
            check_version(ENTRIES_KEY, schema_version)?;
            entries
        }
        StoredEntries::Legacy(entries) => {
            info!("migrating unversioned '{}' record", ENTRIES_KEY);
            entries
        }
    };

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        entry.validate().map_err(|e| {
            SpendwiseError::Storage(format!("Invalid entry '{}': {}", entry.id, e))
        })?;
        if !seen.insert(&entry.id) {
            return Err(SpendwiseError::Storage(format!(
                "Duplicate entry id '{}'",
                entry.id
            )));
        }
    }

    Ok(entries)
}
