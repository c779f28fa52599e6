//! Budget display formatting
//!
//! Category totals and the persistence notice.

use crate::config::settings::Settings;
use crate::services::Budget;

use super::truncate;

const NAME_WIDTH: usize = 24;

/// Format every category with its running total, followed by the grand total
pub fn format_budget_list(budget: &Budget, settings: &Settings) -> String {
    if budget.categories().is_empty() {
        return "No budgets found.\n\nRun 'spendwise budget add <name>' to create one.\n"
            .to_string();
    }

    let symbol = &settings.currency_symbol;
    let mut output = String::new();
    output.push_str(&format!("{:w$} {:>12}\n", "Budget", "Spent", w = NAME_WIDTH));
    output.push_str(&"-".repeat(NAME_WIDTH + 13));
    output.push('\n');

    for (key, total) in budget.categories() {
        output.push_str(&format!(
            "{:w$} {:>12}\n",
            truncate(key.as_str(), NAME_WIDTH),
            total.format_with_symbol(symbol),
            w = NAME_WIDTH
        ));
    }

    output.push_str(&"-".repeat(NAME_WIDTH + 13));
    output.push('\n');
    output.push_str(&format!(
        "{:w$} {:>12}\n",
        "Total",
        budget.grand_total().format_with_symbol(symbol),
        w = NAME_WIDTH
    ));

    output
}

/// Notice shown when changes are not reaching disk
pub fn persistence_warning() -> &'static str {
    "Warning: budget data could not be saved. Changes will be lost when Spendwise exits."
}
