//! Entry CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_entry_details;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BudgetKey, Money};
use crate::services::BudgetStore;

use super::warn_if_not_persisted;

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record spending against a budget
    Add {
        /// Amount spent (e.g., "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Budget category name
        category: String,
    },

    /// Change the amount or category of an entry
    Edit {
        /// Entry id (or a unique prefix of it)
        id: String,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New budget category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Remove {
        /// Entry id (or a unique prefix of it)
        id: String,
    },
}

fn parse_amount(input: &str) -> SpendwiseResult<Money> {
    Money::parse(input).map_err(|e| SpendwiseError::Validation(e.to_string()))
}

/// Handle an entry command
pub fn handle_entry_command(
    store: &mut BudgetStore,
    settings: &Settings,
    cmd: EntryCommands,
) -> SpendwiseResult<()> {
    match cmd {
        EntryCommands::Add { amount, category } => {
            let amount = parse_amount(&amount)?;
            let entry = store.record_spending(&category, amount)?;
            println!(
                "Recorded {} on {} ({})",
                entry.amount.format_with_symbol(&settings.currency_symbol),
                entry.category,
                entry.id.short()
            );
            warn_if_not_persisted(store);
        }

        EntryCommands::Edit {
            id,
            amount,
            category,
        } => {
            if amount.is_none() && category.is_none() {
                return Err(SpendwiseError::Validation(
                    "Nothing to change: pass --amount and/or --category".into(),
                ));
            }

            let mut edited = store.budget().find_entry(&id)?.clone();
            if let Some(amount) = amount {
                edited.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                edited.category = BudgetKey::parse(&category)
                    .map_err(|e| SpendwiseError::Validation(e.to_string()))?;
            }

            let id = edited.id.clone();
            store.edit_entry(edited)?;
            println!("Updated entry:");
            if let Some(entry) = store.budget().get_entry(&id) {
                print!("{}", format_entry_details(store.budget(), entry, settings));
            }
            warn_if_not_persisted(store);
        }

        EntryCommands::Remove { id } => {
            let id = store.budget().find_entry(&id)?.id.clone();
            store.remove_entry(&id);
            println!("Removed entry {}", id.short());
            warn_if_not_persisted(store);
        }
    }

    Ok(())
}
