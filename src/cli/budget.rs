//! Budget CLI commands
//!
//! Listing, creating and removing budget categories, and recomputing their
//! totals from the entries.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_list;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::BudgetKey;
use crate::services::BudgetStore;

use super::warn_if_not_persisted;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets with their totals
    #[command(alias = "ls")]
    List,

    /// Create a new budget category
    Add {
        /// Category name (e.g., "Dining Out")
        name: String,
    },

    /// Remove a budget category (its entries are kept)
    #[command(alias = "rm")]
    Remove {
        /// Category name
        name: String,
    },

    /// Recompute every total from the recorded entries
    Reconcile,
}

/// Handle a budget command
pub fn handle_budget_command(
    store: &mut BudgetStore,
    settings: &Settings,
    cmd: BudgetCommands,
) -> SpendwiseResult<()> {
    match cmd {
        BudgetCommands::List => {
            print!("{}", format_budget_list(store.budget(), settings));
        }

        BudgetCommands::Add { name } => {
            let key = BudgetKey::parse(&name)
                .map_err(|e| SpendwiseError::Validation(e.to_string()))?;
            if store.add_budget(&name)? {
                println!("Created budget: {}", key);
            } else {
                println!("Budget '{}' already exists.", key);
            }
            warn_if_not_persisted(store);
        }

        BudgetCommands::Remove { name } => {
            if !store.remove_budget(&name) {
                return Err(SpendwiseError::budget_not_found(name));
            }
            println!("Removed budget: {}", name.trim());
            warn_if_not_persisted(store);
        }

        BudgetCommands::Reconcile => {
            let before = store.grand_total();
            store.reconcile_totals();
            let after = store.grand_total();
            if before == after {
                println!("Totals already match the recorded entries.");
            } else {
                println!(
                    "Totals reconciled: {} -> {}",
                    before.format_with_symbol(&settings.currency_symbol),
                    after.format_with_symbol(&settings.currency_symbol)
                );
            }
            warn_if_not_persisted(store);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> BudgetStore {
        BudgetStore::open(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_and_remove_budget() {
        let mut store = store();
        let settings = Settings::default();

        handle_budget_command(
            &mut store,
            &settings,
            BudgetCommands::Add {
                name: "Weekend Trips".into(),
            },
        )
        .unwrap();
        assert!(store.categories().contains_key("weekend-trips"));

        handle_budget_command(
            &mut store,
            &settings,
            BudgetCommands::Remove {
                name: "weekend-trips".into(),
            },
        )
        .unwrap();
        assert!(!store.categories().contains_key("weekend-trips"));
    }

    #[test]
    fn test_duplicate_add_is_not_an_error() {
        let mut store = store();
        let result = handle_budget_command(
            &mut store,
            &Settings::default(),
            BudgetCommands::Add {
                name: "dining".into(),
            },
        );
        assert!(result.is_ok());
        assert_eq!(store.categories().len(), 3);
    }

    #[test]
    fn test_remove_unknown_budget() {
        let mut store = store();
        let err = handle_budget_command(
            &mut store,
            &Settings::default(),
            BudgetCommands::Remove {
                name: "nope".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut store = store();
        let err = handle_budget_command(
            &mut store,
            &Settings::default(),
            BudgetCommands::Add { name: "  ".into() },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
