//! Core data models for Spendwise
//!
//! Budget category keys, spending entries, ids and the cents-based money type.

pub mod category;
pub mod entry;
pub mod ids;
pub mod money;

pub use category::{BudgetKey, CategoryValidationError};
pub use entry::{BudgetEntry, EntryValidationError, MAX_ENTRY_AMOUNT};
pub use ids::EntryId;
pub use money::Money;
