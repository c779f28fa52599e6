//! Add-budget dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;
use crate::tui::widgets::TextInput;

use super::{dialog_frame, error_line, hints_line};

/// State for the add-budget form
#[derive(Debug, Clone, Default)]
pub struct BudgetFormState {
    pub name_input: TextInput,
    pub error_message: Option<String>,
}

impl BudgetFormState {
    pub fn new() -> Self {
        Self {
            name_input: TextInput::new().placeholder("e.g. groceries"),
            error_message: None,
        }
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the add-budget dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let inner = dialog_frame(frame, "Add Budget", 52, 6);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.budget_form;
    frame.render_widget(Paragraph::new(form.name_input.to_line("Name", true)), chunks[0]);
    if let Some(ref error) = form.error_message {
        frame.render_widget(Paragraph::new(error_line(error)), chunks[1]);
    }
    frame.render_widget(Paragraph::new(hints_line(false)), chunks[2]);
}

/// Handle key input for the add-budget dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return true;
        }
        KeyCode::Enter => {
            if let Err(e) = save_budget(app) {
                app.budget_form.set_error(e);
            }
            return true;
        }
        _ => {}
    }

    let form = &mut app.budget_form;
    match key.code {
        KeyCode::Backspace => {
            form.clear_error();
            form.name_input.backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.name_input.delete();
        }
        KeyCode::Left => form.name_input.move_left(),
        KeyCode::Right => form.name_input.move_right(),
        KeyCode::Home => form.name_input.move_start(),
        KeyCode::End => form.name_input.move_end(),
        KeyCode::Char(c) => {
            form.clear_error();
            form.name_input.insert(c);
        }
        _ => return false,
    }
    true
}

fn save_budget(app: &mut App) -> Result<(), String> {
    let name = app.budget_form.name_input.value().trim().to_string();

    let created = app.store.add_budget(&name).map_err(|e| e.to_string())?;
    if !created {
        return Err(format!("Budget '{}' already exists", name));
    }

    app.close_dialog();
    // New categories go to the end of the table
    app.selected_budget_index = app.store.categories().len().saturating_sub(1);
    let message = app
        .selected_budget()
        .map(|key| format!("Created budget {}", key));
    if let Some(message) = message {
        app.set_status(message);
    }
    Ok(())
}
