//! Budget state and its transitions
//!
//! [`Budget`] is a plain value: category totals plus the ordered entry list.
//! Every operation borrows the current state and returns the next one, which
//! keeps the arithmetic testable without any storage attached.
//!
//! Totals are maintained incrementally. Each entry mutation debits and
//! credits the affected categories so a category's total stays equal to the
//! sum of its entries. A total never drops below zero: a category removed and
//! later re-added starts from zero and does not inherit older entries.

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BudgetEntry, BudgetKey, EntryId, Money};
use crate::storage::records::Categories;

/// Marker appended to an entry's category when that budget no longer exists
pub const REMOVED_LABEL: &str = "(removed)";

/// Budget categories with their running totals, and the spending entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    categories: Categories,
    entries: Vec<BudgetEntry>,
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(Self::default_categories(), Vec::new())
    }
}

impl Budget {
    /// Build a state from already-validated parts
    pub fn new(categories: Categories, entries: Vec<BudgetEntry>) -> Self {
        Self {
            categories,
            entries,
        }
    }

    /// `{dining: 0, transport: 0, misc: 0}`
    pub fn default_categories() -> Categories {
        BudgetKey::defaults()
            .into_iter()
            .map(|key| (key, Money::zero()))
            .collect()
    }

    // === Queries ===

    /// Category totals in insertion order
    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    /// Entries in creation order
    pub fn entries(&self) -> &[BudgetEntry] {
        &self.entries
    }

    pub fn has_category(&self, key: &str) -> bool {
        self.categories.contains_key(key)
    }

    pub fn total(&self, key: &str) -> Option<Money> {
        self.categories.get(key).copied()
    }

    /// Sum of every category total
    pub fn grand_total(&self) -> Money {
        self.categories.values().sum()
    }

    pub fn get_entry(&self, id: &EntryId) -> Option<&BudgetEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Find an entry by full id or unique id prefix
    pub fn find_entry(&self, identifier: &str) -> SpendwiseResult<&BudgetEntry> {
        let identifier = identifier.trim();
        if let Some(entry) = self.entries.iter().find(|e| e.id.as_str() == identifier) {
            return Ok(entry);
        }

        let mut matches = self.entries.iter().filter(|e| e.id.matches_prefix(identifier));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry),
            (Some(_), Some(_)) => Err(SpendwiseError::Validation(format!(
                "Entry id prefix '{}' is ambiguous",
                identifier
            ))),
            (None, _) => Err(SpendwiseError::entry_not_found(identifier)),
        }
    }

    /// Whether the entry points at a category that no longer exists
    pub fn is_orphaned(&self, entry: &BudgetEntry) -> bool {
        !self.has_category(entry.category.as_str())
    }

    /// Label to show for an entry's category, with a fallback for orphans
    pub fn category_label(&self, entry: &BudgetEntry) -> String {
        if self.is_orphaned(entry) {
            format!("{} {}", entry.category, REMOVED_LABEL)
        } else {
            entry.category.to_string()
        }
    }

    // === Transitions ===

    /// Append an entry and charge its amount to its category
    pub fn add_entry(&self, entry: BudgetEntry) -> SpendwiseResult<Self> {
        entry
            .validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        if !self.has_category(entry.category.as_str()) {
            return Err(SpendwiseError::budget_not_found(entry.category.as_str()));
        }

        if self.get_entry(&entry.id).is_some() {
            return Err(SpendwiseError::Duplicate {
                entity_type: "Entry",
                identifier: entry.id.to_string(),
            });
        }

        let mut next = self.clone();
        next.credit(&entry.category, entry.amount)?;
        next.entries.push(entry);
        Ok(next)
    }

    /// Replace the entry with the same id, keeping its position
    ///
    /// The old amount is taken off the old category and the new amount is
    /// charged to the new category.
    pub fn edit_entry(&self, edited: BudgetEntry) -> SpendwiseResult<Self> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == edited.id)
            .ok_or_else(|| SpendwiseError::entry_not_found(edited.id.as_str()))?;

        edited
            .validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        if !self.has_category(edited.category.as_str()) {
            return Err(SpendwiseError::budget_not_found(edited.category.as_str()));
        }

        let mut next = self.clone();
        let old = std::mem::replace(&mut next.entries[index], edited);
        next.debit(&old.category, old.amount);
        let new = &next.entries[index];
        let (category, amount) = (new.category.clone(), new.amount);
        next.credit(&category, amount)?;
        Ok(next)
    }

    /// Remove an entry and take its amount off its category
    ///
    /// Returns `None` when no entry has that id.
    pub fn remove_entry(&self, id: &EntryId) -> Option<Self> {
        let index = self.entries.iter().position(|e| &e.id == id)?;

        let mut next = self.clone();
        let removed = next.entries.remove(index);
        next.debit(&removed.category, removed.amount);
        Some(next)
    }

    /// Add a category with a zero total
    ///
    /// Returns `None` when the category already exists.
    pub fn add_budget(&self, key: BudgetKey) -> Option<Self> {
        if self.categories.contains_key(&key) {
            return None;
        }

        let mut next = self.clone();
        next.categories.insert(key, Money::zero());
        Some(next)
    }

    /// Remove a category, leaving its entries in place
    ///
    /// Returns `None` when the category does not exist.
    pub fn remove_budget(&self, key: &BudgetKey) -> Option<Self> {
        if !self.categories.contains_key(key) {
            return None;
        }

        let mut next = self.clone();
        next.categories.shift_remove(key);
        Some(next)
    }

    /// Recompute every existing category's total from the entry list
    pub fn reconcile_totals(&self) -> Self {
        let mut next = self.clone();
        for total in next.categories.values_mut() {
            *total = Money::zero();
        }
        for entry in &self.entries {
            if let Some(total) = next.categories.get_mut(&entry.category) {
                *total += entry.amount;
            }
        }
        next
    }

    fn credit(&mut self, key: &BudgetKey, amount: Money) -> SpendwiseResult<()> {
        if let Some(total) = self.categories.get_mut(key) {
            *total = total.checked_add(amount).ok_or_else(|| {
                SpendwiseError::Validation(format!(
                    "Total for budget '{}' would exceed the largest supported amount",
                    key
                ))
            })?;
        }
        Ok(())
    }

    fn debit(&mut self, key: &BudgetKey, amount: Money) {
        if let Some(total) = self.categories.get_mut(key) {
            *total = total.saturating_sub_to_zero(amount);
        }
    }
}
