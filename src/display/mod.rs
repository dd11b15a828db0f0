//! Display formatting for terminal output
//!
//! Tables for listings, and the dashboard renderer with its colour theme
//! decorator.

pub mod dashboard;
pub mod expense;
pub mod report;
pub mod theme;

pub use dashboard::DashboardRenderer;
pub use expense::{format_budget_table, format_expense_details, format_expense_table};
pub use theme::{Line, Renderer, Theme, Themed, Tone};
