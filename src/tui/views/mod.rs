//! TUI Views module
//!
//! The history list, the budget table, the tab bar and the status bar.

pub mod budgets;
pub mod history;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Tabs,
    Frame,
};

use super::app::{ActiveView, App};
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::History => history::render(frame, app, layout.main),
        ActiveView::Budgets => budgets::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    super::dialogs::render(frame, app);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let views = [ActiveView::History, ActiveView::Budgets];
    let selected = views
        .iter()
        .position(|view| *view == app.active_view)
        .unwrap_or(0);

    let tabs = Tabs::new(views.iter().map(|view| view.title()))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}
