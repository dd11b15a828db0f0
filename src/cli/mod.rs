//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the expense store.

pub mod budget;
pub mod config;
pub mod dashboard;
pub mod expense;

pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, handle_history_command, ConfigArgs, HistoryScope};
pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use expense::{handle_expense_command, ExpenseCommands};

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::error::{SpendboardError, SpendboardResult};
use crate::models::{Category, Money, NewExpense};

/// Parse a category name given on the command line
pub(crate) fn parse_category(name: &str) -> SpendboardResult<Category> {
    name.parse()
        .map_err(|e: crate::models::UnknownCategory| SpendboardError::Validation(e.to_string()))
}

/// Parse an amount such as "35.50" or "$35.50"
pub(crate) fn parse_amount(amount: &str) -> SpendboardResult<Money> {
    Money::parse(amount).map_err(|e| SpendboardError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date, defaulting to the clock's today
pub(crate) fn parse_date_or_today(
    date: Option<&str>,
    clock: &dyn Clock,
) -> SpendboardResult<NaiveDate> {
    match date {
        Some(s) => NewExpense::parse_date(s).map_err(|e| SpendboardError::Validation(e.to_string())),
        None => Ok(clock.today()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn test_parse_helpers_map_to_validation() {
        assert_eq!(parse_category("food").unwrap(), Category::Food);
        assert!(parse_category("Travel").unwrap_err().is_validation());

        assert_eq!(parse_amount("$35.50").unwrap(), Money::from_cents(3550));
        assert!(parse_amount("abc").unwrap_err().is_validation());

        let today = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
        let clock = FixedClock::on(today);
        assert_eq!(parse_date_or_today(None, &clock).unwrap(), today);
        assert!(parse_date_or_today(Some("2024-02-30"), &clock)
            .unwrap_err()
            .is_validation());
    }
}
