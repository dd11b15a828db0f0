//! Reports module for Spendboard
//!
//! The aggregation core: windowed totals, groupings, budget evaluation,
//! chart series and the dashboard summary that bundles them. Nothing in here
//! performs I/O; every function works on a snapshot it is handed.

pub mod aggregate;
pub mod budget_status;
pub mod charts;
pub mod dashboard;
pub mod window;

pub use aggregate::{
    attribute, group_by_category, group_by_date, highest, total_of, AggregationOptions,
    Aggregator, CategoryAttribution, WindowSummary,
};
pub use budget_status::{BudgetEvaluation, BudgetProgress, BudgetStatus, CategoryBudget, LimitSource};
pub use charts::{category_breakdown, daily_trend, ChartSeries};
pub use dashboard::DashboardSummary;
pub use window::TimeWindow;
