//! Chart-ready series
//!
//! Plain label/value pairs for the daily trend line and the category
//! breakdown; rendering is left to the display layer.

use serde::Serialize;

use super::aggregate::{group_by_category, group_by_date, CategoryAttribution};
use crate::models::{Category, Expense, Money};

/// Parallel labels and values for one chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Money>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// True when there is nothing worth drawing
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.is_zero())
    }

    pub fn max_value(&self) -> Money {
        self.values.iter().copied().max().unwrap_or_default()
    }

    pub fn total(&self) -> Money {
        self.values.iter().sum()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, Money)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    fn push(&mut self, label: impl Into<String>, value: Money) {
        self.labels.push(label.into());
        self.values.push(value);
    }
}

/// Spend per day, oldest first
pub fn daily_trend<'a, I>(expenses: I) -> ChartSeries
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut series = ChartSeries::default();
    for (date, amount) in group_by_date(expenses) {
        series.push(date.format("%Y-%m-%d").to_string(), amount);
    }
    series
}

/// Spend per category, largest first.
///
/// Every category appears, zero-filled; equal amounts keep category order.
pub fn category_breakdown<'a, I>(expenses: I, attribution: CategoryAttribution) -> ChartSeries
where
    I: IntoIterator<Item = &'a Expense>,
{
    let totals = group_by_category(expenses, attribution);

    let mut rows: Vec<(Category, Money)> = Category::ALL
        .iter()
        .map(|c| (*c, totals.get(c).copied().unwrap_or_default()))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    let mut series = ChartSeries::default();
    for (category, amount) in rows {
        series.push(category.as_str(), amount);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewExpense};
    use chrono::NaiveDate;

    fn expense(day: &str, category: Category, cents: i64) -> Expense {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
        Expense::from_new(
            ExpenseId::new(),
            NewExpense::new(date, category, "Chart test", Money::from_cents(cents)),
        )
    }

    #[test]
    fn test_daily_trend_sorted_and_summed() {
        let expenses = vec![
            expense("2024-12-03", Category::Food, 650),
            expense("2024-12-01", Category::Food, 3550),
            expense("2024-12-01", Category::Transportation, 4500),
        ];
        let series = daily_trend(&expenses);

        assert_eq!(series.labels, vec!["2024-12-01", "2024-12-03"]);
        assert_eq!(series.values, vec![Money::from_cents(8050), Money::from_cents(650)]);
    }

    #[test]
    fn test_category_breakdown_zero_fills_and_sorts() {
        let expenses = vec![
            expense("2024-12-01", Category::Food, 3550),
            expense("2024-12-02", Category::Shopping, 9500),
            expense("2024-12-03", Category::Food, 650),
        ];
        let series = category_breakdown(&expenses, CategoryAttribution::FanOut);

        assert_eq!(series.len(), Category::ALL.len());
        assert_eq!(series.labels[0], "Shopping");
        assert_eq!(series.labels[1], "Food");
        assert_eq!(series.values[1], Money::from_cents(4200));
        // Zero rows keep category order
        assert_eq!(
            &series.labels[2..],
            &["Transportation", "Entertainment", "Utilities", "Healthcare", "Others"]
        );
        assert_eq!(series.total(), Money::from_cents(13700));
    }

    #[test]
    fn test_empty_input() {
        let expenses: Vec<Expense> = Vec::new();
        assert!(daily_trend(&expenses).is_empty());
        let breakdown = category_breakdown(&expenses, CategoryAttribution::FanOut);
        assert!(breakdown.is_blank());
        assert_eq!(breakdown.max_value(), Money::zero());
    }
}
