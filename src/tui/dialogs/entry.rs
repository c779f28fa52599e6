//! Add-entry dialog
//!
//! An amount field and a category picker. Saving records the spending now,
//! through the budget store.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use crate::models::{BudgetEntry, BudgetKey, Money};
use crate::tui::app::App;
use crate::tui::widgets::TextInput;

use super::{dialog_frame, error_line, hints_line, selector_line};

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryField {
    #[default]
    Amount,
    Category,
}

/// State for the add-entry form
#[derive(Debug, Clone, Default)]
pub struct EntryFormState {
    pub amount_input: TextInput,

    /// Categories offered by the picker, in table order
    pub categories: Vec<BudgetKey>,

    pub selected_category_index: usize,

    pub focused_field: EntryField,

    pub error_message: Option<String>,
}

impl EntryFormState {
    /// A blank form offering these categories
    pub fn new(categories: Vec<BudgetKey>) -> Self {
        Self {
            amount_input: TextInput::new().placeholder("e.g. 12.50"),
            categories,
            ..Self::default()
        }
    }

    /// Move to the other field
    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            EntryField::Amount => EntryField::Category,
            EntryField::Category => EntryField::Amount,
        };
    }

    pub fn next_category(&mut self) {
        if !self.categories.is_empty() {
            self.selected_category_index = (self.selected_category_index + 1) % self.categories.len();
        }
    }

    pub fn prev_category(&mut self) {
        if !self.categories.is_empty() {
            self.selected_category_index = self
                .selected_category_index
                .checked_sub(1)
                .unwrap_or(self.categories.len() - 1);
        }
    }

    pub fn selected_category(&self) -> Option<&BudgetKey> {
        self.categories.get(self.selected_category_index)
    }

    /// Parse the amount field
    pub fn amount(&self) -> Result<Money, String> {
        let raw = self.amount_input.value().trim();
        if raw.is_empty() {
            return Err("Amount is required".to_string());
        }
        Money::parse(raw).map_err(|e| e.to_string())
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the add-entry dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let inner = dialog_frame(frame, "Add Entry", 52, 8);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Category
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.entry_form;
    let category = form
        .selected_category()
        .map_or("(no budgets)", |key| key.as_str());

    let amount_line = form
        .amount_input
        .to_line("Amount", form.focused_field == EntryField::Amount);
    frame.render_widget(Paragraph::new(amount_line), chunks[0]);
    frame.render_widget(
        Paragraph::new(selector_line(
            "Category",
            category,
            form.focused_field == EntryField::Category,
        )),
        chunks[2],
    );
    if let Some(ref error) = form.error_message {
        frame.render_widget(Paragraph::new(error_line(error)), chunks[4]);
    }
    frame.render_widget(Paragraph::new(hints_line(true)), chunks[5]);
}

/// Handle key input for the add-entry dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return true;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.entry_form.next_field();
            return true;
        }
        KeyCode::Down if app.entry_form.focused_field == EntryField::Amount => {
            app.entry_form.next_field();
            return true;
        }
        KeyCode::Up if app.entry_form.focused_field == EntryField::Category => {
            app.entry_form.next_field();
            return true;
        }
        KeyCode::Enter => {
            if let Err(e) = save_entry(app) {
                app.entry_form.set_error(e);
            }
            return true;
        }
        _ => {}
    }

    match app.entry_form.focused_field {
        EntryField::Amount => handle_amount_input(app, key),
        EntryField::Category => handle_category_selector(app, key),
    }
}

fn handle_amount_input(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.entry_form;
    match key.code {
        KeyCode::Backspace => {
            form.clear_error();
            form.amount_input.backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.amount_input.delete();
        }
        KeyCode::Left => form.amount_input.move_left(),
        KeyCode::Right => form.amount_input.move_right(),
        KeyCode::Home => form.amount_input.move_start(),
        KeyCode::End => form.amount_input.move_end(),
        KeyCode::Char(c) => {
            form.clear_error();
            form.amount_input.insert(c);
        }
        _ => return false,
    }
    true
}

fn handle_category_selector(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.entry_form;
    match key.code {
        KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => form.next_category(),
        KeyCode::Char('k') | KeyCode::Left => form.prev_category(),
        _ => return false,
    }
    form.clear_error();
    true
}

fn save_entry(app: &mut App) -> Result<(), String> {
    let amount = app.entry_form.amount()?;
    let category = app
        .entry_form
        .selected_category()
        .cloned()
        .ok_or_else(|| "No budget selected".to_string())?;

    app.store
        .add_entry(BudgetEntry::now(category.clone(), amount))
        .map_err(|e| e.to_string())?;

    app.close_dialog();
    app.show_latest();
    app.set_status(format!(
        "Recorded {} on {}",
        amount.format_with_symbol(&app.settings.currency_symbol),
        category
    ));
    Ok(())
}
