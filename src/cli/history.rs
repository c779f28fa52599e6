//! History CLI command

use chrono::{NaiveDate, Utc};
use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_history;
use crate::error::SpendwiseResult;
use crate::services::{history, BudgetStore, DateRange};

/// Arguments for `spendwise history`
#[derive(Args, Debug, Default)]
pub struct HistoryArgs {
    /// First day of the range (YYYY-MM-DD); defaults to the start of the history window
    #[arg(short, long)]
    pub from: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub to: Option<NaiveDate>,
}

impl HistoryArgs {
    pub fn range(&self) -> DateRange {
        DateRange::from_days(self.from, self.to)
    }
}

/// Print entries in the selected range, newest first
pub fn handle_history_command(
    store: &BudgetStore,
    settings: &Settings,
    args: HistoryArgs,
) -> SpendwiseResult<()> {
    let range = args.range();
    let now = Utc::now();
    let window = settings.history_window();
    let (from, to) = range.resolve(now, window);

    let entries = history(store.entries(), range.interval(now, window));

    println!(
        "History {} to {}",
        from.format("%Y-%m-%d"),
        to.format("%Y-%m-%d")
    );
    println!();
    print!("{}", format_history(store.budget(), &entries, settings));

    Ok(())
}
