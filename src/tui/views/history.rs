//! History view
//!
//! Newest-first entries in the selected range. A row being swiped is drawn
//! shifted by the drag offset and turns red once releasing would delete it.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::display::format_entry_row;
use crate::tui::app::App;

/// Terminal columns covered by a drag offset given in projected units
///
/// A projected unit is two touch pixels. Positive means a drag to the right.
pub fn offset_columns(offset: i64, cell_width_px: u16) -> i64 {
    let cell = i64::from(cell_width_px.max(1));
    (offset * 2) / cell
}

/// Shift a row's text sideways, clipping whatever moves past the left edge
pub fn shift_text(text: &str, columns: i64) -> String {
    if columns >= 0 {
        let pad = usize::try_from(columns).unwrap_or(0);
        format!("{}{}", " ".repeat(pad), text)
    } else {
        let skip = usize::try_from(columns.unsigned_abs()).unwrap_or(usize::MAX);
        text.chars().skip(skip).collect()
    }
}

/// Render the history list
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    app.history_area = area;

    let (from, to) = app.range.resolve(Utc::now(), app.settings.history_window());
    let title = format!(
        " History {} - {} ",
        from.format("%d %b %Y"),
        to.format("%d %b %Y")
    );
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = app
        .visible_entries()
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            let text = format_entry_row(app.store.budget(), entry, app.settings);
            if app.swipe_row == Some(row) && app.swipe.is_swiping() {
                let columns = offset_columns(app.swipe.drag_offset(), app.settings.cell_width_px);
                let style = if app.swipe.in_danger_zone() {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Yellow)
                };
                ListItem::new(shift_text(&text, columns)).style(style)
            } else if app.store.budget().is_orphaned(entry) {
                ListItem::new(text).style(Style::default().fg(Color::DarkGray))
            } else {
                ListItem::new(text)
            }
        })
        .collect();

    if items.is_empty() {
        app.history_offset = 0;
        let text = Paragraph::new("No entries in this range. Press 'a' to add one, [ and ] to move it.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default()
        .with_offset(app.history_offset)
        .with_selected(Some(app.selected_entry_index));
    frame.render_stateful_widget(list, area, &mut state);
    app.history_offset = state.offset();
}
