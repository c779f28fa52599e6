//! Status bar view
//!
//! Shows the grand total, a warning while changes are not being saved, the
//! latest status message and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveView, App};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![];

    spans.push(Span::styled(" Total: ", Style::default().fg(Color::White)));
    spans.push(Span::styled(
        app.store
            .grand_total()
            .format_with_symbol(&app.settings.currency_symbol),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));

    if !app.store.is_persistent() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "NOT SAVED",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Key hints (right-aligned)
    let hints = match app.active_view {
        ActiveView::History => " a:Add  d:Delete  [/]:Range  Tab:Budgets  q:Quit ",
        ActiveView::Budgets => " a:Add  d:Remove  r:Reconcile  Tab:History  q:Quit ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = usize::from(area.width)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
