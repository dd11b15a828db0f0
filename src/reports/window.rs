//! Time windows
//!
//! A window is resolved against a reference date. The week window runs from
//! the most recent week start up to and including the reference date; the
//! month window is the whole calendar month of the reference date.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A time range used to filter expenses before aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeWindow {
    Today,
    ThisWeek,
    ThisMonth,
    AllTime,
}

impl TimeWindow {
    /// Narrowest first
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Today,
        TimeWindow::ThisWeek,
        TimeWindow::ThisMonth,
        TimeWindow::AllTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::ThisWeek => "This week",
            Self::ThisMonth => "This month",
            Self::AllTime => "All time",
        }
    }

    /// Whether `date` falls inside this window
    pub fn contains(&self, date: NaiveDate, reference: NaiveDate, week_start: Weekday) -> bool {
        match self.bounds(reference, week_start) {
            Some((start, end)) => date >= start && date <= end,
            None => true,
        }
    }

    /// Inclusive date bounds, `None` for the unbounded all-time window
    pub fn bounds(&self, reference: NaiveDate, week_start: Weekday) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::Today => Some((reference, reference)),
            Self::ThisWeek => Some((start_of_week(reference, week_start), reference)),
            Self::ThisMonth => Some(month_bounds(reference)),
            Self::AllTime => None,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The most recent `week_start` day on or before `reference`
pub fn start_of_week(reference: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (reference.weekday().num_days_from_sunday() + 7
        - week_start.num_days_from_sunday())
        % 7;
    reference - Days::new(u64::from(offset))
}

/// First and last day of the month containing `reference`
pub fn month_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = reference.with_day(1).unwrap_or(reference);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(reference);
    (first, last)
}
