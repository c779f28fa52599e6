//! Event handler for the TUI
//!
//! Routes keyboard and mouse events to the appropriate handlers
//! based on the current application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::gesture::{SwipeOutcome, TouchEvent};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Tick => Ok(()),
        Event::Resize(_, _) => {
            app.cancel_swipe();
            Ok(())
        }
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    app.clear_status();

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    // An open dialog takes every other key
    if app.has_dialog() {
        dialogs::handle_key(app, key);
        return Ok(());
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.quit();
            return Ok(());
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_view();
            return Ok(());
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return Ok(());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return Ok(());
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::History => handle_history_key(app, key),
        ActiveView::Budgets => handle_budgets_key(app, key),
    }
}

/// Keys specific to the history view
fn handle_history_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('a') => app.open_dialog(ActiveDialog::AddEntry),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_entry(),
        KeyCode::Char('[') => app.shift_range(-1),
        KeyCode::Char(']') => app.shift_range(1),
        _ => {}
    }
    Ok(())
}

/// Keys specific to the budget view
fn handle_budgets_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('a') => app.open_dialog(ActiveDialog::AddBudget),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_budget(),
        KeyCode::Char('r') => {
            app.store.reconcile_totals();
            app.set_status("Totals reconciled");
        }
        _ => {}
    }
    Ok(())
}

/// Feed left-button mouse input on the history list to the swipe recognizer
///
/// The mouse column times the configured cell width stands in for the touch
/// X coordinate.
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if app.active_view != ActiveView::History || app.has_dialog() {
        return Ok(());
    }

    let x = f64::from(mouse.column) * f64::from(app.settings.cell_width_px);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match app.history_row_at(mouse.row) {
            Some(row) => {
                app.selected_entry_index = row;
                app.swipe_row = Some(row);
                app.swipe.handle(TouchEvent::Start(x));
            }
            None => app.cancel_swipe(),
        },
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.swipe_row.is_some() {
                app.swipe.handle(TouchEvent::Move(x));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let outcome = app.swipe.handle(TouchEvent::End);
            if let Some(row) = app.swipe_row.take() {
                if outcome == SwipeOutcome::Delete {
                    debug!(row, "swipe delete");
                    app.delete_history_row(row);
                }
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::models::Money;
    use crate::services::BudgetStore;
    use crate::storage::MemoryStore;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn store_with_entries(count: i64) -> BudgetStore {
        let mut store = BudgetStore::open(Box::new(MemoryStore::new()));
        for n in 1..=count {
            store
                .record_spending("transport", Money::from_cents(n * 100))
                .unwrap();
        }
        store
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    fn swipe(app: &mut App, row: u16, from: u16, to: u16) {
        handle_event(app, mouse(MouseEventKind::Down(MouseButton::Left), from, row)).unwrap();
        handle_event(app, mouse(MouseEventKind::Drag(MouseButton::Left), to, row)).unwrap();
        handle_event(app, mouse(MouseEventKind::Up(MouseButton::Left), to, row)).unwrap();
    }

    #[test]
    fn test_quit_keys() {
        let mut store = store_with_entries(0);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_switches_view() {
        let mut store = store_with_entries(0);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active_view, ActiveView::Budgets);
        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active_view, ActiveView::History);
    }

    #[test]
    fn test_delete_key_removes_selected_entry() {
        let mut store = store_with_entries(2);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        handle_event(&mut app, key(KeyCode::Char('d'))).unwrap();

        assert_eq!(app.store.entries().len(), 1);
        assert_eq!(app.store.entries()[0].amount, Money::from_cents(200));
    }

    #[test]
    fn test_long_swipe_deletes_row() {
        let mut store = store_with_entries(2);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);
        app.history_area = Rect::new(0, 1, 80, 10);

        // 20 columns at 8px is 160px, projected 0 -> -80
        // Row 0 holds the newest entry
        swipe(&mut app, 2, 0, 20);

        assert_eq!(app.store.entries().len(), 1);
        assert_eq!(app.store.entries()[0].amount, Money::from_cents(100));
        assert!(app.swipe_row.is_none());
        assert!(!app.swipe.is_swiping());
    }

    #[test]
    fn test_short_swipe_keeps_row() {
        let mut store = store_with_entries(1);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);
        app.history_area = Rect::new(0, 1, 80, 10);

        // 5 columns is 40px, projected -20
        swipe(&mut app, 2, 0, 5);

        assert_eq!(app.store.entries().len(), 1);
        assert_eq!(app.swipe.start(), 0);
        assert_eq!(app.swipe.current(), 0);
    }

    #[test]
    fn test_swipe_outside_list_is_ignored() {
        let mut store = store_with_entries(1);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);
        app.history_area = Rect::new(0, 1, 80, 10);

        swipe(&mut app, 9, 0, 40);
        assert_eq!(app.store.entries().len(), 1);
    }

    #[test]
    fn test_mouse_ignored_in_budget_view() {
        let mut store = store_with_entries(1);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);
        app.history_area = Rect::new(0, 1, 80, 10);
        app.toggle_view();

        swipe(&mut app, 2, 0, 40);
        assert_eq!(app.store.entries().len(), 1);
    }

    #[test]
    fn test_range_keys() {
        let mut store = store_with_entries(1);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Char('['))).unwrap();
        assert!(app.visible_entries().is_empty());
        handle_event(&mut app, key(KeyCode::Char(']'))).unwrap();
        assert_eq!(app.visible_entries().len(), 1);
    }

    #[test]
    fn test_add_entry_dialog_records_spending() {
        let mut store = store_with_entries(0);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.active_dialog, ActiveDialog::AddEntry);

        type_text(&mut app, "12.50");
        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        // dining -> transport
        handle_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();

        assert!(!app.has_dialog());
        assert_eq!(app.store.entries().len(), 1);
        assert_eq!(app.store.entries()[0].amount, Money::from_cents(1250));
        assert_eq!(app.store.budget().total("transport"), Some(Money::from_cents(1250)));
        assert_eq!(app.visible_entries().len(), 1);
        assert!(app.status_message.as_deref().unwrap_or_default().contains("$12.50"));
    }

    #[test]
    fn test_add_entry_dialog_rejects_bad_amounts() {
        let mut store = store_with_entries(0);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "abc");
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.has_dialog());
        assert!(app.entry_form.error_message.is_some());

        for _ in 0..3 {
            handle_event(&mut app, key(KeyCode::Backspace)).unwrap();
        }
        assert!(app.entry_form.error_message.is_none());
        type_text(&mut app, "0");
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();

        let error = app.entry_form.error_message.clone().unwrap_or_default();
        assert!(error.contains("greater than zero"));
        assert!(app.store.entries().is_empty());
    }

    #[test]
    fn test_dialog_captures_keys_and_escape_closes_it() {
        let mut store = store_with_entries(1);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "qd");
        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.active_view, ActiveView::History);
        assert_eq!(app.store.entries().len(), 1);
        assert_eq!(app.entry_form.amount_input.value(), "qd");

        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!app.has_dialog());
        assert!(!app.should_quit);
        assert_eq!(app.store.entries().len(), 1);
    }

    #[test]
    fn test_add_budget_dialog() {
        let mut store = store_with_entries(0);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        handle_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.active_dialog, ActiveDialog::AddBudget);

        type_text(&mut app, "Rent");
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();

        assert!(!app.has_dialog());
        assert!(app.store.categories().contains_key("rent"));
        assert_eq!(app.selected_budget().map(|k| k.as_str()), Some("rent"));
    }

    #[test]
    fn test_add_budget_dialog_reports_duplicates() {
        let mut store = store_with_entries(0);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);

        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        handle_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "dining");
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();

        assert!(app.has_dialog());
        let error = app.budget_form.error_message.clone().unwrap_or_default();
        assert!(error.contains("already exists"));
        assert_eq!(app.store.categories().len(), 3);

        handle_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.categories().len(), 3);
    }

    #[test]
    fn test_mouse_ignored_while_dialog_open() {
        let mut store = store_with_entries(1);
        let settings = Settings::default();
        let mut app = App::new(&mut store, &settings);
        app.history_area = Rect::new(0, 1, 80, 10);

        handle_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        swipe(&mut app, 2, 0, 40);
        assert_eq!(app.store.entries().len(), 1);
    }
}
