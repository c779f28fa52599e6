//! Modal dialogs for the TUI
//!
//! Each dialog keeps its form state on [`App`], renders over the active view
//! and consumes every key while open.

pub mod budget;
pub mod entry;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear},
    Frame,
};

use super::app::{ActiveDialog, App};
use super::layout::centered_rect_fixed;

/// Render the open dialog, if any
pub fn render(frame: &mut Frame, app: &mut App) {
    match app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::AddEntry => entry::render(frame, app),
        ActiveDialog::AddBudget => budget::render(frame, app),
    }
}

/// Route a key to the open dialog
///
/// Returns whether the key changed anything.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.active_dialog {
        ActiveDialog::None => false,
        ActiveDialog::AddEntry => entry::handle_key(app, key),
        ActiveDialog::AddBudget => budget::handle_key(app, key),
    }
}

/// Clear a centered box, draw its border and return the inner area
fn dialog_frame(frame: &mut Frame, title: &str, width: u16, height: u16) -> Rect {
    let area = centered_rect_fixed(width, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    }
}

/// A value cycled with j/k
fn selector_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let value_style = if focused {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let hint = if focused { " ◀ j/k ▶" } else { "" };

    Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(format!(" {} ", value), value_style),
        Span::styled(hint, Style::default().fg(Color::Yellow)),
    ])
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    ))
}

fn hints_line(with_tab: bool) -> Line<'static> {
    let mut spans = Vec::new();
    if with_tab {
        spans.push(Span::styled("[Tab]", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" Next  "));
    }
    spans.push(Span::styled("[Enter]", Style::default().fg(Color::Green)));
    spans.push(Span::raw(" Save  "));
    spans.push(Span::styled("[Esc]", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Cancel"));
    Line::from(spans)
}
