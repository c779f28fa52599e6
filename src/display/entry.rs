//! Entry display formatting
//!
//! History rows look like `15 Mar  dining            $12.50  1a2b3c4d`, with
//! a "(removed)" marker on entries whose category has since been deleted.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::config::settings::Settings;
use crate::models::BudgetEntry;
use crate::services::Budget;

use super::truncate;

const CATEGORY_WIDTH: usize = 24;

const FALLBACK_DATE_FORMAT: &str = "%d %b";

/// Render a date with the configured format, falling back to `dd Mon`
pub fn format_date(date: &DateTime<Utc>, settings: &Settings) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(&settings.date_format)).is_err() {
        out.clear();
        // Cannot fail: the fallback is a fixed, valid format
        let _ = write!(out, "{}", date.format(FALLBACK_DATE_FORMAT));
    }
    out
}

/// Format a single history row
pub fn format_entry_row(budget: &Budget, entry: &BudgetEntry, settings: &Settings) -> String {
    format!(
        "{:7} {:w$} {:>12}  {}",
        format_date(&entry.date, settings),
        truncate(&budget.category_label(entry), CATEGORY_WIDTH),
        entry.amount.format_with_symbol(&settings.currency_symbol),
        entry.id.short(),
        w = CATEGORY_WIDTH
    )
}

/// Format an already filtered and ordered list of entries
pub fn format_history(budget: &Budget, entries: &[&BudgetEntry], settings: &Settings) -> String {
    if entries.is_empty() {
        return "No entries in this range.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:7} {:w$} {:>12}  {}\n",
        "Date",
        "Category",
        "Amount",
        "Id",
        w = CATEGORY_WIDTH
    ));
    output.push_str(&"-".repeat(7 + CATEGORY_WIDTH + 26));
    output.push('\n');

    for entry in entries {
        output.push_str(&format_entry_row(budget, entry, settings));
        output.push('\n');
    }

    output
}

/// Format full details of one entry
pub fn format_entry_details(budget: &Budget, entry: &BudgetEntry, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Entry:    {}\n", entry.id));
    output.push_str(&format!("Date:     {}\n", entry.date.format("%Y-%m-%d %H:%M UTC")));
    output.push_str(&format!("Category: {}\n", budget.category_label(entry)));
    output.push_str(&format!(
        "Amount:   {}\n",
        entry.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output
}
