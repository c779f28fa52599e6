//! Spendwise - Terminal-based spending tracker
//!
//! This library provides the core of the Spendwise budget tracker: named
//! budget categories with running totals, dated spending entries charged
//! against them, a date-range history filter and a swipe-to-delete gesture
//! recognizer used by the terminal UI.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (budget keys, entries, money)
//! - `storage`: Versioned JSON records and the record store backends
//! - `services`: Budget state, the persisting store and history filtering
//! - `gesture`: Swipe-to-delete state machine
//! - `cli`, `display`, `tui`: User-facing surfaces
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise::config::paths::SpendwisePaths;
//! use spendwise::models::Money;
//! use spendwise::services::BudgetStore;
//! use spendwise::storage::FileStore;
//!
//! let paths = SpendwisePaths::new()?;
//! let mut store = BudgetStore::open(Box::new(FileStore::new(paths)?));
//! store.record_spending("dining", Money::parse("12.50")?)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod gesture;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{SpendwiseError, SpendwiseResult};
