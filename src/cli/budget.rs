//! Budget CLI commands
//!
//! Implements CLI commands for viewing and replacing the monthly budget.

use clap::Subcommand;

use super::{parse_amount, parse_category};
use crate::clock::Clock;
use crate::config::Settings;
use crate::display::format_budget_table;
use crate::error::{SpendboardError, SpendboardResult};
use crate::models::{Budget, Money};
use crate::services::ExpenseStore;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show limits and this month's progress
    Show {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Set the monthly limit for a category ("0" removes it)
    Set {
        /// Category name
        category: String,
        /// Amount (e.g., "250" or "250.00")
        #[arg(allow_negative_numbers = true)]
        amount: String,
    },

    /// Set an explicit overall monthly limit
    Monthly {
        /// Amount (e.g., "1250")
        #[arg(allow_negative_numbers = true)]
        amount: String,
    },

    /// Use the sum of the category limits as the overall limit again
    ClearMonthly,

    /// Restore the starter budget
    Reset,
}

/// Handle a budget command
pub fn handle_budget_command(
    store: &mut ExpenseStore,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: BudgetCommands,
) -> SpendboardResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Show { date } => {
            let reference = super::parse_date_or_today(date.as_deref(), clock)?;
            let summary = store.dashboard(reference, settings.aggregation_options());
            println!("Budget for {}", reference.format("%B %Y"));
            print!("{}", format_budget_table(store.budget(), &summary.budget, symbol));
        }

        BudgetCommands::Set { category, amount } => {
            let category = parse_category(&category)?;
            let limit = parse_amount(&amount)?;
            if limit.is_negative() {
                return Err(SpendboardError::Validation(format!(
                    "Budget for {} cannot be negative",
                    category
                )));
            }

            let mut budget = store.budget().clone();
            if limit.is_zero() {
                budget.limits.remove(&category);
            } else {
                budget.limits.insert(category, limit);
            }
            store.set_budget(budget)?;

            println!(
                "Set {} budget to {}",
                category,
                limit.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Monthly { amount } => {
            let limit = parse_amount(&amount)?;
            let budget = store.budget().clone().with_monthly_limit(limit);
            store.set_budget(budget)?;
            println!("Set monthly limit to {}", limit.format_with_symbol(symbol));
        }

        BudgetCommands::ClearMonthly => {
            let mut budget = store.budget().clone();
            budget.monthly_limit = None;
            let total: Money = budget.category_total();
            store.set_budget(budget)?;
            println!(
                "Cleared monthly limit; overall limit is now the category sum ({})",
                total.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Reset => {
            store.set_budget(Budget::starter())?;
            println!("Restored the starter budget");
        }
    }

    Ok(())
}
