//! Terminal User Interface module
//!
//! A ratatui front end with a history list (swipe an entry sideways with the
//! mouse to delete it), a budget table and dialogs for adding to both.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
