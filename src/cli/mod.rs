//! CLI command handlers
//!
//! Bridges the clap argument parsing with the budget store.

pub mod budget;
pub mod entry;
pub mod history;

pub use budget::{handle_budget_command, BudgetCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use history::{handle_history_command, HistoryArgs};

use crate::display::persistence_warning;
use crate::services::BudgetStore;

/// Print the persistence notice if the last write did not reach disk
pub(crate) fn warn_if_not_persisted(store: &BudgetStore) {
    if !store.is_persistent() {
        eprintln!("{}", persistence_warning());
    }
}
