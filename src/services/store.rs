//! The budget store
//!
//! Owns the current [`Budget`] and the record store it persists to. Each
//! mutation applies a state transition, swaps in the new state, then writes
//! every record that is out of date in full. A failed write is logged and
//! the record stays pending, so the next mutation writes it again alongside
//! whatever that mutation touched. The store reports itself as persisting
//! only while nothing is pending.
//!
//! A record that cannot be decoded on open is set aside by the backend before
//! defaults take its place. If it cannot be set aside the store stops writing
//! for the session rather than overwrite it.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BudgetEntry, BudgetKey, EntryId, Money};
use crate::storage::records::{self, Categories, BUDGETS_KEY, ENTRIES_KEY};
use crate::storage::RecordStore;

use super::budget::Budget;

/// The durable records making up a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Record {
    Budgets,
    Entries,
}

impl Record {
    fn key(self) -> &'static str {
        match self {
            Record::Budgets => BUDGETS_KEY,
            Record::Entries => ENTRIES_KEY,
        }
    }
}

/// Budget state backed by durable records
pub struct BudgetStore {
    records: Box<dyn RecordStore>,
    state: Budget,
    /// Records whose current state has not reached the backend
    pending: BTreeSet<Record>,
    /// Cleared when an unreadable record could not be set aside
    writable: bool,
    notices: Vec<String>,
}

impl BudgetStore {
    /// Load both records, falling back to defaults for missing or unreadable ones
    pub fn open(mut backend: Box<dyn RecordStore>) -> Self {
        let mut recovery = Recovery::default();
        let categories = recovery
            .load(&mut *backend, BUDGETS_KEY, records::decode_budgets)
            .unwrap_or_else(Budget::default_categories);
        let entries = recovery
            .load(&mut *backend, ENTRIES_KEY, records::decode_entries)
            .unwrap_or_default();

        info!(
            budgets = categories.len(),
            entries = entries.len(),
            durable = backend.is_durable(),
            writable = !recovery.read_only,
            "budget store opened"
        );

        Self {
            records: backend,
            state: Budget::new(categories, entries),
            pending: BTreeSet::new(),
            writable: !recovery.read_only,
            notices: recovery.notices,
        }
    }

    /// Current state
    pub fn budget(&self) -> &Budget {
        &self.state
    }

    pub fn categories(&self) -> &Categories {
        self.state.categories()
    }

    pub fn entries(&self) -> &[BudgetEntry] {
        self.state.entries()
    }

    pub fn grand_total(&self) -> Money {
        self.state.grand_total()
    }

    /// Whether every change so far has reached durable storage
    ///
    /// `false` for a session-only store, while any record is waiting to be
    /// rewritten after a failed write, and for the rest of a session in which
    /// an unreadable record could not be set aside.
    pub fn is_persistent(&self) -> bool {
        self.writable && self.records.is_durable() && self.pending.is_empty()
    }

    /// Problems found while opening, one message per record
    pub fn load_notices(&self) -> &[String] {
        &self.notices
    }

    /// Append an entry and charge its category
    pub fn add_entry(&mut self, entry: BudgetEntry) -> SpendwiseResult<()> {
        let id = entry.id.clone();
        let next = self.state.add_entry(entry)?;
        debug!(entry = %id, "entry added");
        self.commit(next, &[Record::Budgets, Record::Entries]);
        Ok(())
    }

    /// Record spending now against a category by name
    pub fn record_spending(&mut self, category: &str, amount: Money) -> SpendwiseResult<BudgetEntry> {
        let key = BudgetKey::parse(category).map_err(|e| SpendwiseError::Validation(e.to_string()))?;
        let entry = BudgetEntry::now(key, amount);
        self.add_entry(entry.clone())?;
        Ok(entry)
    }

    /// Replace an entry in place, moving its amount between category totals
    pub fn edit_entry(&mut self, edited: BudgetEntry) -> SpendwiseResult<()> {
        let id = edited.id.clone();
        let next = self.state.edit_entry(edited)?;
        debug!(entry = %id, "entry edited");
        self.commit(next, &[Record::Budgets, Record::Entries]);
        Ok(())
    }

    /// Remove an entry; `false` if it was already gone
    pub fn remove_entry(&mut self, id: &EntryId) -> bool {
        match self.state.remove_entry(id) {
            Some(next) => {
                debug!(entry = %id, "entry removed");
                self.commit(next, &[Record::Budgets, Record::Entries]);
                true
            }
            None => false,
        }
    }

    /// Add a category by name; `false` if it already exists
    pub fn add_budget(&mut self, name: &str) -> SpendwiseResult<bool> {
        let key = BudgetKey::parse(name).map_err(|e| SpendwiseError::Validation(e.to_string()))?;
        match self.state.add_budget(key.clone()) {
            Some(next) => {
                debug!(budget = %key, "budget added");
                self.commit(next, &[Record::Budgets]);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a category by name; `false` if it did not exist
    ///
    /// Entries charged to it are kept.
    pub fn remove_budget(&mut self, name: &str) -> bool {
        let Ok(key) = BudgetKey::parse(name) else {
            return false;
        };
        match self.state.remove_budget(&key) {
            Some(next) => {
                debug!(budget = %key, "budget removed");
                self.commit(next, &[Record::Budgets]);
                true
            }
            None => false,
        }
    }

    /// Recompute category totals from the entries and persist them
    pub fn reconcile_totals(&mut self) {
        let next = self.state.reconcile_totals();
        self.commit(next, &[Record::Budgets]);
    }

    fn commit(&mut self, next: Budget, touched: &[Record]) {
        self.state = next;
        self.pending.extend(touched.iter().copied());

        if !self.writable {
            debug!("store is read-only for this session, skipping write");
            return;
        }

        let pending: Vec<Record> = self.pending.iter().copied().collect();
        for record in pending {
            match self.write(record) {
                Ok(()) => {
                    self.pending.remove(&record);
                }
                Err(e) => warn!(
                    record = record.key(),
                    error = %e,
                    "could not persist record, continuing in memory"
                ),
            }
        }
    }

    fn write(&mut self, record: Record) -> SpendwiseResult<()> {
        let encoded = match record {
            Record::Budgets => records::encode_budgets(self.state.categories())?,
            Record::Entries => records::encode_entries(self.state.entries())?,
        };
        self.records.save(record.key(), &encoded)
    }
}

/// Outcome of reading the records on open
#[derive(Default)]
struct Recovery {
    notices: Vec<String>,
    read_only: bool,
}

impl Recovery {
    fn load<T>(
        &mut self,
        backend: &mut dyn RecordStore,
        key: &str,
        decode: fn(Value) -> SpendwiseResult<T>,
    ) -> Option<T> {
        let loaded = backend.load(key).and_then(|value| value.map(decode).transpose());
        let error = match loaded {
            Ok(Some(value)) => return Some(value),
            Ok(None) => {
                debug!(record = key, "record absent, using defaults");
                return None;
            }
            Err(e) => e,
        };

        match backend.set_aside(key) {
            Ok(location) => {
                warn!(
                    record = key,
                    error = %error,
                    moved_to = %location,
                    "unreadable record set aside, using defaults"
                );
                self.notices.push(format!(
                    "Could not read the {} record ({}). It was moved to {} and defaults are in use.",
                    key, error, location
                ));
            }
            Err(e) => {
                warn!(
                    record = key,
                    error = %error,
                    move_error = %e,
                    "unreadable record could not be set aside, changes will not be saved"
                );
                self.notices.push(format!(
                    "Could not read the {} record ({}). Changes will not be saved this session.",
                    key, error
                ));
                self.read_only = true;
            }
        }
        None
    }
}
