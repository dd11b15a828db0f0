//! Dashboard renderer
//!
//! Lays out a [`DashboardSummary`]: window totals, month statistics, budget
//! progress and the two bar charts.

use super::report::{format_bar, format_bar_chart, format_percentage, separator, truncate};
use super::theme::{Line, Renderer, Tone};
use crate::config::Settings;
use crate::models::{Category, Money};
use crate::reports::{BudgetProgress, DashboardSummary, LimitSource, TimeWindow};

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 24;

/// Uncoloured dashboard layout
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    currency_symbol: String,
    date_format: String,
    month_only: bool,
    scope: Option<String>,
}

impl DashboardRenderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
            month_only: false,
            scope: None,
        }
    }

    /// Only show the month's figures in the totals block
    pub fn month_only(mut self, month_only: bool) -> Self {
        self.month_only = month_only;
        self
    }

    /// Note under the heading saying which expenses were kept
    pub fn scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    fn row(&self, label: &str, value: String) -> Line {
        Line::plain(format!("{:<width$}{}", label, value, width = LABEL_WIDTH))
    }

    fn totals(&self, summary: &DashboardSummary, lines: &mut Vec<Line>) {
        let windows: &[TimeWindow] = if self.month_only {
            &[TimeWindow::ThisMonth]
        } else {
            &TimeWindow::ALL
        };

        for window in windows {
            let figures = summary.window(*window);
            let noun = if figures.count == 1 { "expense" } else { "expenses" };
            lines.push(self.row(
                window.label(),
                format!("{:>12}  ({} {})", self.money(figures.total), figures.count, noun),
            ));
        }
    }

    fn statistics(&self, summary: &DashboardSummary, lines: &mut Vec<Line>) {
        let month = summary.window(TimeWindow::ThisMonth);
        lines.push(self.row("Average per expense", format!("{:>12}", self.money(month.average))));
        lines.push(self.row(
            "Average per day",
            format!("{:>12}", self.money(summary.average_per_day)),
        ));

        match &summary.highest {
            Some(expense) => lines.push(self.row(
                "Highest expense",
                format!(
                    "{:>12}  {}",
                    self.money(expense.amount),
                    truncate(&expense.description, 24)
                ),
            )),
            None => lines.push(Line::new(
                Tone::Muted,
                format!("{:<width$}none", "Highest expense", width = LABEL_WIDTH),
            )),
        }

        match summary.top_category {
            Some((category, amount)) => lines.push(Line::new(
                Tone::Accent,
                format!(
                    "{:<width$}{:>12}  {} {}",
                    "Top category",
                    self.money(amount),
                    category.icon(),
                    category,
                    width = LABEL_WIDTH
                ),
            )),
            None => lines.push(Line::new(
                Tone::Muted,
                format!("{:<width$}none", "Top category", width = LABEL_WIDTH),
            )),
        }
    }

    fn progress_line(&self, label: &str, progress: &BudgetProgress) -> Line {
        let figures = if progress.budget.is_zero() {
            format!("{} / no limit", self.money(progress.spent))
        } else {
            format!(
                "{} / {}",
                self.money(progress.spent),
                self.money(progress.budget)
            )
        };

        Line::new(
            progress.status.into(),
            format!(
                "{:<18}{:<24}{} {:>4}",
                label,
                figures,
                format_bar(progress.percentage, 100.0, 10),
                format_percentage(progress.percentage)
            ),
        )
    }

    fn budget(&self, summary: &DashboardSummary, lines: &mut Vec<Line>) {
        lines.push(Line::new(Tone::Heading, "Budget"));
        for line in &summary.budget.categories {
            let label = format!("{} {}", line.category.icon(), line.category);
            lines.push(self.progress_line(&label, &line.progress));
        }

        let overall = &summary.budget.overall;
        lines.push(self.progress_line("Overall", overall));
        let source = match summary.budget.overall_source {
            LimitSource::MonthlyLimit => "monthly limit",
            LimitSource::CategorySum => "sum of category limits",
        };
        lines.push(Line::new(
            Tone::Muted,
            format!("Remaining {} (limit from {})", self.money(overall.remaining), source),
        ));

        let over: Vec<&str> = summary
            .budget
            .over_budget()
            .map(|line| line.category.as_str())
            .collect();
        if !over.is_empty() {
            lines.push(Line::new(
                Tone::Danger,
                format!("Over budget: {}", over.join(", ")),
            ));
        }
    }

    fn charts(&self, summary: &DashboardSummary, lines: &mut Vec<Line>) {
        lines.push(Line::new(Tone::Heading, "Spending by category"));
        if summary.category_breakdown.is_blank() {
            lines.push(Line::new(Tone::Muted, "No expenses this month"));
        } else {
            let mut series = summary.category_breakdown.clone();
            for label in series.labels.iter_mut() {
                if let Ok(category) = label.parse::<Category>() {
                    *label = format!("{} {}", category.icon(), category);
                }
            }
            lines.extend(
                format_bar_chart(&series, BAR_WIDTH, &self.currency_symbol)
                    .into_iter()
                    .map(Line::plain),
            );
        }

        lines.push(Line::blank());
        lines.push(Line::new(Tone::Heading, "Daily trend"));
        if summary.daily_trend.is_empty() {
            lines.push(Line::new(Tone::Muted, "No expenses this month"));
        } else {
            lines.extend(
                format_bar_chart(&summary.daily_trend, BAR_WIDTH, &self.currency_symbol)
                    .into_iter()
                    .map(Line::plain),
            );
        }
    }
}

impl Renderer for DashboardRenderer {
    fn render(&self, summary: &DashboardSummary) -> Vec<Line> {
        let mut lines = vec![
            Line::new(
                Tone::Heading,
                format!("Spendboard for {}", summary.reference.format(&self.date_format)),
            ),
            Line::new(Tone::Muted, separator(WIDTH)),
        ];
        if let Some(scope) = &self.scope {
            lines.push(Line::new(Tone::Accent, format!("Only expenses {}", scope)));
        }

        self.totals(summary, &mut lines);
        lines.push(Line::blank());
        self.statistics(summary, &mut lines);
        lines.push(Line::blank());
        self.budget(summary, &mut lines);
        lines.push(Line::blank());
        self.charts(summary, &mut lines);

        if summary.options.attribution != Default::default() {
            lines.push(Line::blank());
            lines.push(Line::new(
                Tone::Muted,
                format!(
                    "Multi-category expenses counted as: {}",
                    summary.options.attribution.label()
                ),
            ));
        }

        lines
    }
}
