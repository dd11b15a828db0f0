//! Dashboard summary
//!
//! Collects everything the dashboard shows for one reference date: the
//! windowed totals, month averages, the month's largest expense and top
//! category, both chart series, and the budget evaluation.

use chrono::{Datelike, NaiveDate};

use super::aggregate::{AggregationOptions, Aggregator, WindowSummary};
use super::budget_status::BudgetEvaluation;
use super::charts::{category_breakdown, daily_trend, ChartSeries};
use super::window::TimeWindow;
use crate::models::{Budget, Category, Expense, Money};

/// Dashboard figures for one snapshot and reference date
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub reference: NaiveDate,
    pub options: AggregationOptions,
    /// Today, this week, this month, all time (in that order)
    pub windows: Vec<WindowSummary>,
    /// Month total divided by the day of the month
    pub average_per_day: Money,
    /// Largest expense of the month
    pub highest: Option<Expense>,
    /// Category with the most spend this month
    pub top_category: Option<(Category, Money)>,
    /// The month's spend per category, largest first
    pub category_breakdown: ChartSeries,
    /// The month's spend per day
    pub daily_trend: ChartSeries,
    pub budget: BudgetEvaluation,
}

impl DashboardSummary {
    pub fn generate(
        expenses: &[Expense],
        budget: &Budget,
        reference: NaiveDate,
        options: AggregationOptions,
    ) -> Self {
        let aggregator = Aggregator::with_options(expenses, reference, options);
        let windows: Vec<WindowSummary> = TimeWindow::ALL
            .iter()
            .map(|w| aggregator.summary(*w))
            .collect();

        let month = aggregator.in_window(TimeWindow::ThisMonth);
        let month_total = aggregator.total(TimeWindow::ThisMonth);
        let by_category = aggregator.by_category(TimeWindow::ThisMonth);

        let top_category = Category::ALL
            .iter()
            .filter_map(|c| by_category.get(c).map(|amount| (*c, *amount)))
            .filter(|(_, amount)| amount.is_positive())
            .fold(None, |best: Option<(Category, Money)>, row| match best {
                Some(current) if current.1 >= row.1 => Some(current),
                _ => Some(row),
            });

        Self {
            reference: aggregator.reference(),
            options: aggregator.options(),
            windows,
            average_per_day: month_total.divide_rounded(reference.day() as usize),
            highest: aggregator.highest(TimeWindow::ThisMonth).cloned(),
            top_category,
            category_breakdown: category_breakdown(month.iter().copied(), options.attribution),
            daily_trend: daily_trend(month.iter().copied()),
            budget: BudgetEvaluation::evaluate(&by_category, month_total, budget),
        }
    }

    /// Figures for one window
    pub fn window(&self, window: TimeWindow) -> WindowSummary {
        self.windows
            .iter()
            .find(|w| w.window == window)
            .copied()
            .unwrap_or(WindowSummary {
                window,
                total: Money::zero(),
                count: 0,
                average: Money::zero(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewExpense};
    use crate::reports::budget_status::{BudgetStatus, LimitSource};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn expense(day: &str, category: Category, cents: i64) -> Expense {
        Expense::from_new(
            ExpenseId::new(),
            NewExpense::new(date(day), category, "Dashboard test", Money::from_cents(cents)),
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("2024-11-30", Category::Shopping, 50000),
            expense("2024-12-01", Category::Food, 3550),
            expense("2024-12-01", Category::Transportation, 4500),
            expense("2024-12-05", Category::Food, 12000),
            expense("2024-12-08", Category::Healthcare, 15000),
            expense("2024-12-09", Category::Transportation, 12000),
            expense("2024-12-10", Category::Food, 1850),
        ]
    }

    #[test]
    fn test_generate_month_figures() {
        let budget = Budget::new()
            .with_limit(Category::Food, Money::from_units(100))
            .with_limit(Category::Healthcare, Money::from_units(200));
        let summary = DashboardSummary::generate(
            &sample(),
            &budget,
            date("2024-12-10"),
            AggregationOptions::default(),
        );

        let month = summary.window(TimeWindow::ThisMonth);
        assert_eq!(month.count, 6);
        assert_eq!(month.total, Money::from_cents(48900));
        assert_eq!(summary.window(TimeWindow::Today).total, Money::from_cents(1850));
        assert_eq!(summary.window(TimeWindow::AllTime).count, 7);
        assert_eq!(summary.average_per_day, Money::from_cents(4890));

        // Food 174.00 beats Transportation 165.00 and Healthcare 150.00
        assert_eq!(summary.top_category, Some((Category::Food, Money::from_cents(17400))));
        assert_eq!(summary.highest.as_ref().unwrap().amount, Money::from_cents(15000));

        assert_eq!(summary.daily_trend.len(), 5);
        assert_eq!(summary.category_breakdown.labels[0], "Food");

        let food = summary.budget.get(Category::Food).unwrap();
        assert_eq!(food.status, BudgetStatus::Danger);
        assert_eq!(summary.budget.overall_source, LimitSource::CategorySum);
        assert_eq!(summary.budget.overall.spent, Money::from_cents(48900));
    }

    #[test]
    fn test_generate_empty() {
        let summary = DashboardSummary::generate(
            &[],
            &Budget::starter(),
            date("2024-12-10"),
            AggregationOptions::default(),
        );

        for window in TimeWindow::ALL {
            let figures = summary.window(window);
            assert_eq!(figures.total, Money::zero());
            assert_eq!(figures.count, 0);
            assert_eq!(figures.average, Money::zero());
        }
        assert!(summary.highest.is_none());
        assert!(summary.top_category.is_none());
        assert!(summary.daily_trend.is_empty());
        assert_eq!(summary.budget.overall.status, BudgetStatus::Success);
    }
}
