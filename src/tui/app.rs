//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use chrono::Utc;
use ratatui::layout::Rect;

use crate::config::settings::Settings;
use crate::gesture::SwipeRecognizer;
use crate::models::{BudgetEntry, BudgetKey, EntryId};
use crate::services::{history, BudgetStore, DateRange};

use super::dialogs::{budget::BudgetFormState, entry::EntryFormState};

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    History,
    Budgets,
}

impl ActiveView {
    pub fn title(&self) -> &'static str {
        match self {
            Self::History => "History",
            Self::Budgets => "Budgets",
        }
    }
}

/// Which modal dialog is open, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddEntry,
    AddBudget,
}

/// Main application state
pub struct App<'a> {
    /// The budget store all edits go through
    pub store: &'a mut BudgetStore,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// History range being viewed
    pub range: DateRange,

    /// Selected row in the history list
    pub selected_entry_index: usize,

    /// Selected row in the budget table
    pub selected_budget_index: usize,

    /// Swipe recognizer for the history list
    pub swipe: SwipeRecognizer,

    /// History row the current swipe started on
    pub swipe_row: Option<usize>,

    /// Where the history list was last drawn, for mouse hit-testing
    pub history_area: Rect,

    /// First history row visible in `history_area`
    pub history_offset: usize,

    /// Status message to display
    pub status_message: Option<String>,

    /// Currently open dialog
    pub active_dialog: ActiveDialog,

    /// Add-entry form state
    pub entry_form: EntryFormState,

    /// Add-budget form state
    pub budget_form: BudgetFormState,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(store: &'a mut BudgetStore, settings: &'a Settings) -> Self {
        // Surface the first problem found while loading
        let status_message = store.load_notices().first().cloned();
        Self {
            store,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            range: DateRange::default(),
            selected_entry_index: 0,
            selected_budget_index: 0,
            swipe: SwipeRecognizer::new(),
            swipe_row: None,
            history_area: Rect::default(),
            history_offset: 0,
            status_message,
            active_dialog: ActiveDialog::None,
            entry_form: EntryFormState::default(),
            budget_form: BudgetFormState::default(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Open a dialog with a fresh form
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.cancel_swipe();
        match dialog {
            ActiveDialog::None => {}
            ActiveDialog::AddEntry => {
                let categories: Vec<BudgetKey> = self.store.categories().keys().cloned().collect();
                if categories.is_empty() {
                    self.set_status("Add a budget first (Tab, then a)");
                    return;
                }
                self.entry_form = EntryFormState::new(categories);
            }
            ActiveDialog::AddBudget => self.budget_form = BudgetFormState::new(),
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    /// Reset the history to the default window with the newest entry selected
    pub fn show_latest(&mut self) {
        self.range = DateRange::default();
        self.selected_entry_index = 0;
    }

    /// Switch between the history and budget views
    pub fn toggle_view(&mut self) {
        self.active_view = match self.active_view {
            ActiveView::History => ActiveView::Budgets,
            ActiveView::Budgets => ActiveView::History,
        };
        self.cancel_swipe();
    }

    /// Entries in the current range, newest first
    pub fn visible_entries(&self) -> Vec<&BudgetEntry> {
        let interval = self
            .range
            .interval(Utc::now(), self.settings.history_window());
        history(self.store.entries(), interval)
    }

    /// Number of rows in the active view
    pub fn row_count(&self) -> usize {
        match self.active_view {
            ActiveView::History => self.visible_entries().len(),
            ActiveView::Budgets => self.store.categories().len(),
        }
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match self.active_view {
            ActiveView::History => &mut self.selected_entry_index,
            ActiveView::Budgets => &mut self.selected_budget_index,
        }
    }

    /// Move selection up in the current view
    pub fn move_up(&mut self) {
        let index = self.selected_index_mut();
        *index = index.saturating_sub(1);
    }

    /// Move selection down in the current view
    pub fn move_down(&mut self) {
        let max = self.row_count();
        let index = self.selected_index_mut();
        if *index < max.saturating_sub(1) {
            *index += 1;
        }
    }

    /// Keep selections inside their lists after rows disappear
    pub fn clamp_selection(&mut self) {
        let entries = self.visible_entries().len();
        let budgets = self.store.categories().len();
        self.selected_entry_index = self.selected_entry_index.min(entries.saturating_sub(1));
        self.selected_budget_index = self.selected_budget_index.min(budgets.saturating_sub(1));
    }

    /// Move the history range by one window (negative goes back in time)
    pub fn shift_range(&mut self, windows: i64) {
        let days = windows * i64::from(self.settings.history_days.max(1));
        self.range = self
            .range
            .shifted(days, Utc::now(), self.settings.history_window());
        self.selected_entry_index = 0;
        self.cancel_swipe();
    }

    /// Id of the entry shown on a history row
    pub fn entry_id_at(&self, row: usize) -> Option<EntryId> {
        self.visible_entries().get(row).map(|e| e.id.clone())
    }

    /// History row under a terminal line, if any
    pub fn history_row_at(&self, line: u16) -> Option<usize> {
        // Inside the list border
        let top = self.history_area.y.saturating_add(1);
        let bottom = self
            .history_area
            .y
            .saturating_add(self.history_area.height)
            .saturating_sub(1);
        if line < top || line >= bottom {
            return None;
        }

        let row = self.history_offset + usize::from(line - top);
        (row < self.visible_entries().len()).then_some(row)
    }

    /// Delete the entry on a history row
    pub fn delete_history_row(&mut self, row: usize) {
        let Some(id) = self.entry_id_at(row) else {
            return;
        };
        if self.store.remove_entry(&id) {
            self.set_status(format!("Deleted entry {}", id.short()));
        }
        self.clamp_selection();
    }

    /// Delete the selected history entry
    pub fn delete_selected_entry(&mut self) {
        self.delete_history_row(self.selected_entry_index);
    }

    /// Remove the selected budget category
    pub fn remove_selected_budget(&mut self) {
        let Some(key) = self.selected_budget().cloned() else {
            return;
        };
        if self.store.remove_budget(key.as_str()) {
            self.set_status(format!("Removed budget {}", key));
        }
        self.clamp_selection();
    }

    /// Key of the selected budget row
    pub fn selected_budget(&self) -> Option<&BudgetKey> {
        self.store
            .categories()
            .get_index(self.selected_budget_index)
            .map(|(key, _)| key)
    }

    /// Drop any gesture in progress
    pub fn cancel_swipe(&mut self) {
        self.swipe = SwipeRecognizer::new();
        self.swipe_row = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::MemoryStore;

    fn store_with_entries(count: i64) -> BudgetStore {
        let mut store = BudgetStore::open(Box::new(MemoryStore::new()));
        for cents in 1..=count {
            store
                .record_spending("dining", Money::from_cents(cents * 100))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_visible_entries_newest_first() {
        let mut store = store_with_entries(3);
        let settings = Settings::default();
        let app = App::new(&mut store, &settings);

        let visible = app.visible_entries();
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].amount, Money::from_cents(300));
        assert_eq!(visible[2].amount, Money::from_cents(100));
    }

    #[test]
    fn test_selection_bounds() {
        let mut store = store_with_entries(2);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        app.move_up();
        assert_eq!(app.selected_entry_index, 0);
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_entry_index, 1);

        app.toggle_view();
        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_budget_index, 2);
        assert_eq!(app.selected_budget().map(|k| k.as_str()), Some("misc"));
    }

    #[test]
    fn test_delete_selected_entry() {
        let mut store = store_with_entries(2);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        app.move_down();
        app.delete_selected_entry();

        assert_eq!(app.store.entries().len(), 1);
        assert_eq!(app.selected_entry_index, 0);
        assert_eq!(app.store.grand_total(), Money::from_cents(200));
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_shift_range_back_hides_recent_entries() {
        let mut store = store_with_entries(1);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        app.shift_range(-1);
        assert!(app.visible_entries().is_empty());

        app.shift_range(1);
        assert_eq!(app.visible_entries().len(), 1);
    }

    #[test]
    fn test_history_row_hit_testing() {
        let mut store = store_with_entries(2);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);
        app.history_area = Rect::new(0, 3, 60, 10);

        assert_eq!(app.history_row_at(3), None);
        assert_eq!(app.history_row_at(4), Some(0));
        assert_eq!(app.history_row_at(5), Some(1));
        assert_eq!(app.history_row_at(6), None);
        assert_eq!(app.history_row_at(12), None);
    }

    #[test]
    fn test_remove_selected_budget_keeps_entries() {
        let mut store = store_with_entries(1);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        app.toggle_view();
        app.remove_selected_budget();

        assert!(!app.store.categories().contains_key("dining"));
        assert_eq!(app.store.entries().len(), 1);
    }

    #[test]
    fn test_add_entry_dialog_needs_a_budget() {
        let mut store = store_with_entries(0);
        for name in ["dining", "transport", "misc"] {
            store.remove_budget(name);
        }
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        app.open_dialog(ActiveDialog::AddEntry);
        assert!(!app.has_dialog());
        assert!(app.status_message.is_some());

        app.open_dialog(ActiveDialog::AddBudget);
        assert_eq!(app.active_dialog, ActiveDialog::AddBudget);
        app.close_dialog();
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_load_notice_becomes_status() {
        let records = MemoryStore::new().with_record("entries", serde_json::json!("garbage"));
        let mut store = BudgetStore::open(Box::new(records));
        let settings = Settings::default();
        let app = App::new(&mut store, &settings);

        let status = app.status_message.as_deref().unwrap_or_default();
        assert!(status.contains("entries"));
    }
}
