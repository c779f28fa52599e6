//! Budget view
//!
//! Category totals with the grand total underneath.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::App;

/// Render the budget table
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let symbol = &app.settings.currency_symbol;
    let block = Block::default()
        .title(" Budgets ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let categories = app.store.categories();
    if categories.is_empty() {
        let text = Paragraph::new("No budgets. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Budget").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Spent").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = categories
        .iter()
        .map(|(key, total)| {
            let total_style = if total.is_zero() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(key.to_string()),
                Cell::from(format!("{:>12}", total.format_with_symbol(symbol))).style(total_style),
            ])
        })
        .collect();

    let footer = Row::new(vec![
        Cell::from("Total"),
        Cell::from(format!(
            "{:>12}",
            app.store.grand_total().format_with_symbol(symbol)
        )),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [Constraint::Min(20), Constraint::Length(14)];
    let table = Table::new(rows, widths)
        .header(header)
        .footer(footer)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(Some(app.selected_budget_index));
    frame.render_stateful_widget(table, area, &mut state);
}
