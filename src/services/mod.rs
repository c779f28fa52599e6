//! Service layer for Spendwise
//!
//! The budget state and its transitions, the persisting store wrapped around
//! it, and history filtering.

pub mod budget;
pub mod history;
pub mod store;

pub use budget::{Budget, REMOVED_LABEL};
pub use history::{filter_entries, history, range_padding, DateRange, Interval};
pub use store::BudgetStore;
