//! Dashboard CLI command

use clap::Args;

use super::parse_date_or_today;
use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{DashboardRenderer, Renderer, Themed};
use crate::error::SpendboardResult;
use crate::services::{ExpenseFilter, ExpenseStore};

/// Options for `dashboard`
#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Only show this month's totals
    #[arg(short, long)]
    pub month_only: bool,

    /// Disable colours
    #[arg(long)]
    pub no_color: bool,

    /// Only count expenses whose description or category contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only count expenses in this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only count expenses paid with this method
    #[arg(short, long)]
    pub payment: Option<String>,
}

impl DashboardArgs {
    /// The expense filter these options describe
    pub fn filter(&self) -> ExpenseFilter {
        let mut filter = ExpenseFilter::new();
        filter.search = self.search.clone();
        filter.category = self.category.clone();
        filter.payment_method = self.payment.clone();
        filter
    }
}

/// Build the renderer for the given settings, themed unless colour is off
pub fn build_renderer(settings: &Settings, args: &DashboardArgs) -> Box<dyn Renderer> {
    let base = DashboardRenderer::new(settings)
        .month_only(args.month_only)
        .scope(args.filter().describe());
    if args.no_color {
        Box::new(base)
    } else {
        Box::new(Themed::new(base, settings.theme))
    }
}

/// Handle the dashboard command
pub fn handle_dashboard_command(
    store: &ExpenseStore,
    settings: &Settings,
    clock: &dyn Clock,
    args: DashboardArgs,
) -> SpendboardResult<()> {
    let reference = parse_date_or_today(args.date.as_deref(), clock)?;
    let summary = store.dashboard_for(&args.filter(), reference, settings.aggregation_options());
    let renderer = build_renderer(settings, &args);
    print!("{}", renderer.render_to_string(&summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Budget;
    use crate::reports::{AggregationOptions, DashboardSummary};
    use chrono::NaiveDate;

    fn summary() -> DashboardSummary {
        DashboardSummary::generate(
            &[],
            &Budget::starter(),
            NaiveDate::from_ymd_opt(2024, 12, 10).unwrap(),
            AggregationOptions::default(),
        )
    }

    #[test]
    fn test_no_color_renderer_is_plain() {
        let args = DashboardArgs {
            no_color: true,
            ..Default::default()
        };
        let output = build_renderer(&Settings::default(), &args).render_to_string(&summary());
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_filter_options_scope_the_dashboard() {
        let args = DashboardArgs {
            category: Some("Food".into()),
            payment: Some("UPI".into()),
            no_color: true,
            ..Default::default()
        };
        let filter = args.filter();
        assert_eq!(filter.category.as_deref(), Some("Food"));
        assert_eq!(filter.payment_method.as_deref(), Some("UPI"));
        assert!(filter.search.is_none());

        let output = build_renderer(&Settings::default(), &args).render_to_string(&summary());
        assert!(output.contains("Only expenses category Food, paid by UPI"));

        let plain = build_renderer(&Settings::default(), &DashboardArgs::default())
            .render_to_string(&summary());
        assert!(!plain.contains("Only expenses"));
    }

    #[test]
    fn test_default_renderer_is_themed() {
        let output = build_renderer(&Settings::default(), &DashboardArgs::default())
            .render_to_string(&summary());
        assert!(output.contains("\x1b[1;36m"));
    }
}
