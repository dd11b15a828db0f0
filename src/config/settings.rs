//! User settings for Spendboard
//!
//! Manages display preferences and the knobs of the aggregation layer:
//! where a week starts and how multi-category expenses are attributed.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::paths::SpendboardPaths;
use crate::display::theme::Theme;
use crate::error::SpendboardError;
use crate::reports::{AggregationOptions, CategoryAttribution};

/// User settings for Spendboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of week (0 = Sunday, 1 = Monday, ... 6 = Saturday)
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: u8,

    /// Colour theme for the dashboard
    #[serde(default)]
    pub theme: Theme,

    /// How an expense tagged with several categories counts per category
    #[serde(default)]
    pub category_attribution: CategoryAttribution,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_first_day_of_week() -> u8 {
    0 // Sunday
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            first_day_of_week: default_first_day_of_week(),
            theme: Theme::default(),
            category_attribution: CategoryAttribution::default(),
        }
    }
}

impl Settings {
    /// The configured week start; out-of-range values fall back to Sunday
    pub fn week_start(&self) -> Weekday {
        match self.first_day_of_week {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    /// Options handed to the aggregator
    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            week_start: self.week_start(),
            attribution: self.category_attribution,
        }
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendboardPaths) -> Result<Self, SpendboardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SpendboardError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendboardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject settings the renderers cannot use
    pub fn validate(&self) -> Result<(), SpendboardError> {
        let bad_format = || {
            SpendboardError::Config(format!("Invalid date format '{}'", self.date_format))
        };
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(bad_format());
        }
        // Time-of-day specifiers parse but cannot be applied to a bare date
        let sample = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or_else(bad_format)?;
        let mut rendered = String::new();
        write!(rendered, "{}", sample.format(&self.date_format)).map_err(|_| bad_format())?;
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendboardPaths) -> Result<(), SpendboardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SpendboardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SpendboardError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
