//! User settings for Spendwise
//!
//! Display preferences, the default history window and the terminal cell
//! width used to turn mouse columns into swipe coordinates.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::SpendwisePaths;
use crate::error::SpendwiseError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for Spendwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol prefixed to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format used in the history list (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Length of the default history window, in days
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// Approximate width of a terminal cell in pixels
    ///
    /// Mouse columns are multiplied by this before entering the swipe
    /// recognizer, whose thresholds are expressed in touch pixels.
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: u16,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%d %b".to_string()
}

fn default_history_days() -> u32 {
    7
}

fn default_cell_width_px() -> u16 {
    8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            history_days: default_history_days(),
            cell_width_px: default_cell_width_px(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    ///
    /// A date format chrono cannot render is replaced by the default.
    pub fn load_or_create(paths: &SpendwisePaths) -> Result<Self, SpendwiseError> {
        let settings: Option<Settings> = read_json(paths.settings_file()).map_err(|e| {
            SpendwiseError::Config(format!("Failed to load settings: {}", e))
        })?;

        // Don't save yet - let caller decide when to persist
        let mut settings = settings.unwrap_or_default();
        if !is_valid_date_format(&settings.date_format) {
            warn!(
                date_format = %settings.date_format,
                "invalid date format in settings, using the default"
            );
            settings.date_format = default_date_format();
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendwisePaths) -> Result<(), SpendwiseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Write the defaults to disk unless a settings file already exists
    ///
    /// Returns `true` when a file was created.
    pub fn ensure_saved(paths: &SpendwisePaths) -> Result<bool, SpendwiseError> {
        if paths.settings_file().exists() {
            return Ok(false);
        }
        Settings::default().save(paths)?;
        Ok(true)
    }

    /// The default history window as a chrono duration
    pub fn history_window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.history_days.max(1)))
    }
}

/// Whether chrono can render dates with this strftime format
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
