//! Display formatting for terminal output
//!
//! Plain-text renderings of budgets and entries shared by the CLI commands.

pub mod budget;
pub mod entry;

pub use budget::{format_budget_list, persistence_warning};
pub use entry::{format_date, format_entry_details, format_entry_row, format_history};

/// Truncate a string to `max_len` characters, marking the cut with an ellipsis
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
