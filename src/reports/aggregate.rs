//! Aggregation over an expense snapshot
//!
//! Everything here is a pure function of the slice it is given. The
//! [`Aggregator`] binds a snapshot to a reference date for the windowed
//! totals; the free functions work on any iterator of expenses so callers
//! can feed them a window, a filtered listing, or the whole snapshot.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::window::TimeWindow;
use crate::models::{Category, Expense, Money};

/// How an expense tagged with several categories is credited per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryAttribution {
    /// The full amount is credited to every category. Category totals can
    /// then add up to more than the real spend.
    #[default]
    FanOut,
    /// The amount is divided between the categories; leftover cents go to
    /// the first categories so the parts add up exactly.
    EvenSplit,
    /// Only the first category is credited
    FirstOnly,
}

impl CategoryAttribution {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FanOut => "fan-out",
            Self::EvenSplit => "even-split",
            Self::FirstOnly => "first-only",
        }
    }
}

/// Knobs that change how windows and groupings resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    pub week_start: Weekday,
    pub attribution: CategoryAttribution,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            attribution: CategoryAttribution::FanOut,
        }
    }
}

/// Total, count and average for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSummary {
    pub window: TimeWindow,
    pub total: Money,
    pub count: usize,
    pub average: Money,
}

/// Windowed totals over a snapshot, resolved against a reference date
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    expenses: &'a [Expense],
    reference: NaiveDate,
    options: AggregationOptions,
}

impl<'a> Aggregator<'a> {
    pub fn new(expenses: &'a [Expense], reference: NaiveDate) -> Self {
        Self::with_options(expenses, reference, AggregationOptions::default())
    }

    pub fn with_options(
        expenses: &'a [Expense],
        reference: NaiveDate,
        options: AggregationOptions,
    ) -> Self {
        Self {
            expenses,
            reference,
            options,
        }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn options(&self) -> AggregationOptions {
        self.options
    }

    /// Expenses inside `window`, in snapshot order
    pub fn in_window(&self, window: TimeWindow) -> Vec<&'a Expense> {
        self.window_iter(window).collect()
    }

    /// Sum of amounts inside `window`
    pub fn total(&self, window: TimeWindow) -> Money {
        self.window_iter(window).map(|e| e.amount).sum()
    }

    /// Number of expenses inside `window`
    pub fn count(&self, window: TimeWindow) -> usize {
        self.window_iter(window).count()
    }

    /// Mean amount inside `window`; zero when the window is empty
    pub fn average(&self, window: TimeWindow) -> Money {
        self.summary(window).average
    }

    pub fn summary(&self, window: TimeWindow) -> WindowSummary {
        let (total, count) = self
            .window_iter(window)
            .fold((Money::zero(), 0), |(total, count), e| (total + e.amount, count + 1));

        WindowSummary {
            window,
            total,
            count,
            average: total.divide_rounded(count),
        }
    }

    /// Category totals inside `window` using the configured attribution
    pub fn by_category(&self, window: TimeWindow) -> BTreeMap<Category, Money> {
        group_by_category(self.window_iter(window), self.options.attribution)
    }

    /// Daily totals inside `window`
    pub fn by_date(&self, window: TimeWindow) -> BTreeMap<NaiveDate, Money> {
        group_by_date(self.window_iter(window))
    }

    /// Largest expense inside `window`
    pub fn highest(&self, window: TimeWindow) -> Option<&'a Expense> {
        highest(self.window_iter(window))
    }

    fn window_iter(&self, window: TimeWindow) -> impl Iterator<Item = &'a Expense> + 'a {
        let expenses: &'a [Expense] = self.expenses;
        let reference = self.reference;
        let week_start = self.options.week_start;
        expenses
            .iter()
            .filter(move |e| window.contains(e.date, reference, week_start))
    }
}

/// Sum of all amounts
pub fn total_of<'a, I>(expenses: I) -> Money
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().map(|e| e.amount).sum()
}

/// Date to summed amount, dates ascending
pub fn group_by_date<'a, I>(expenses: I) -> BTreeMap<NaiveDate, Money>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut daily = BTreeMap::new();
    for expense in expenses {
        *daily.entry(expense.date).or_insert_with(Money::zero) += expense.amount;
    }
    daily
}

/// Category to summed amount under the given attribution
pub fn group_by_category<'a, I>(
    expenses: I,
    attribution: CategoryAttribution,
) -> BTreeMap<Category, Money>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals = BTreeMap::new();
    for expense in expenses {
        for (category, amount) in attribute(expense, attribution) {
            *totals.entry(category).or_insert_with(Money::zero) += amount;
        }
    }
    totals
}

/// The per-category portions one expense contributes
pub fn attribute(expense: &Expense, attribution: CategoryAttribution) -> Vec<(Category, Money)> {
    match attribution {
        CategoryAttribution::FanOut => expense
            .categories
            .iter()
            .map(|c| (*c, expense.amount))
            .collect(),
        CategoryAttribution::FirstOnly => expense
            .primary_category()
            .map(|c| vec![(c, expense.amount)])
            .unwrap_or_default(),
        CategoryAttribution::EvenSplit => {
            let parts = expense.categories.len() as i64;
            if parts == 0 {
                return Vec::new();
            }
            let cents = expense.amount.cents();
            let share = cents / parts;
            let leftover = cents % parts;
            expense
                .categories
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let extra = if (i as i64) < leftover { 1 } else { 0 };
                    (*c, Money::from_cents(share + extra))
                })
                .collect()
        }
    }
}

/// The expense with the largest amount; the earliest one wins a tie
pub fn highest<'a, I>(expenses: I) -> Option<&'a Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().fold(None, |best, expense| match best {
        Some(current) if current.amount >= expense.amount => Some(current),
        _ => Some(expense),
    })
}
