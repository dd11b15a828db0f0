//! Expense CLI commands
//!
//! Implements CLI commands for adding, listing and deleting expenses.

use clap::{Subcommand, ValueEnum};

use super::{parse_amount, parse_category, parse_date_or_today};
use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{SpendboardError, SpendboardResult};
use crate::models::{Expense, NewExpense, PaymentMethod};
use crate::services::{sort_expenses, ExpenseFilter, ExpenseStore, SortField, SortOrder};

/// Sort keys accepted by `expense list --sort`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    Date,
    Category,
    Amount,
    Description,
}

impl From<SortKey> for SortField {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Date => SortField::Date,
            SortKey::Category => SortField::Category,
            SortKey::Amount => SortField::Amount,
            SortKey::Description => SortField::Description,
        }
    }
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "35.50" or "$35.50")
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Category; repeat to tag several categories
        #[arg(short, long = "category", required = true)]
        categories: Vec<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Payment method (Cash, UPI, Card, Bank Transfer)
        #[arg(short, long, default_value = "Cash")]
        payment: String,
        /// Wallet or account the money came from
        #[arg(short, long)]
        wallet: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Tag; repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List expenses
    List {
        /// Text to look for in descriptions and category names
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category name
        #[arg(short, long)]
        category: Option<String>,
        /// Exact payment method label
        #[arg(short, long)]
        payment: Option<String>,
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Sort key
        #[arg(long, value_enum, default_value = "date")]
        sort: SortKey,
        /// Sort ascending instead of newest/largest first
        #[arg(long)]
        asc: bool,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one expense
    Show {
        /// Expense ID (full UUID or exp-xxxxxxxx)
        expense: String,
    },

    /// Delete an expense by ID or by its position in `expense list`
    Delete {
        /// Expense ID (full UUID or exp-xxxxxxxx)
        #[arg(required_unless_present = "index", conflicts_with = "index")]
        expense: Option<String>,
        /// 1-based position in the unfiltered insertion-order listing
        #[arg(short, long)]
        index: Option<usize>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &mut ExpenseStore,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ExpenseCommands,
) -> SpendboardResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            categories,
            date,
            payment,
            wallet,
            notes,
            tags,
        } => {
            let mut parsed = categories.iter().map(|c| parse_category(c));
            let first = parsed
                .next()
                .ok_or_else(|| SpendboardError::Validation("At least one category is required".into()))??;

            let payment: PaymentMethod = payment.parse().map_err(SpendboardError::Validation)?;
            let date = parse_date_or_today(date.as_deref(), clock)?;

            let mut new = NewExpense::new(date, first, description, parse_amount(&amount)?)
                .paid_with(payment);
            for category in parsed {
                new = new.also_in(category?);
            }
            if let Some(wallet) = wallet {
                new = new.with_wallet(wallet);
            }
            if let Some(notes) = notes {
                new = new.with_notes(notes);
            }
            for tag in tags {
                new = new.with_tag(tag);
            }

            let expense = store.add(new)?;
            println!(
                "Added expense: {} {} ({})",
                expense.description,
                expense.amount.format_with_symbol(symbol),
                expense.category_label()
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            search,
            category,
            payment,
            month,
            from,
            to,
            sort,
            asc,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            filter.search = search;
            filter.category = category;
            filter.payment_method = payment;
            filter.month = month;
            filter.start_date = from
                .as_deref()
                .map(NewExpense::parse_date)
                .transpose()
                .map_err(|e| SpendboardError::Validation(e.to_string()))?;
            filter.end_date = to
                .as_deref()
                .map(NewExpense::parse_date)
                .transpose()
                .map_err(|e| SpendboardError::Validation(e.to_string()))?;

            let mut rows: Vec<&Expense> = filter.apply(store.expenses());
            let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
            sort_expenses(&mut rows, sort.into(), order);

            let matched = rows.len();
            if let Some(limit) = limit {
                rows.truncate(limit);
            }

            print!("{}", format_expense_table(&rows, symbol));
            if matched > 0 {
                let total: crate::models::Money = rows.iter().map(|e| e.amount).sum();
                println!(
                    "Showing {} of {} expenses, total {}",
                    rows.len(),
                    matched,
                    total.format_with_symbol(symbol)
                );
            }
        }

        ExpenseCommands::Show { expense } => {
            let found = store
                .find(&expense)
                .ok_or_else(|| SpendboardError::expense_not_found(&expense))?;
            print!("{}", format_expense_details(found, symbol));
            let trail = store.history_of(found)?;
            if !trail.is_empty() {
                println!();
                println!("History:");
                for entry in &trail {
                    println!("  {}", entry.format_human_readable());
                }
            }
        }

        ExpenseCommands::Delete { expense, index } => {
            let removed = match (expense, index) {
                (_, Some(0)) => {
                    return Err(SpendboardError::Validation(
                        "Index starts at 1".to_string(),
                    ))
                }
                (_, Some(index)) => store.delete_at(index - 1)?,
                (Some(reference), None) => {
                    let id = store
                        .find(&reference)
                        .map(|e| e.id)
                        .ok_or_else(|| SpendboardError::expense_not_found(&reference))?;
                    store.delete(id)?
                }
                (None, None) => {
                    return Err(SpendboardError::Validation(
                        "Give an expense ID or --index".to_string(),
                    ))
                }
            };

            println!(
                "Deleted expense: {} {}",
                removed.description,
                removed.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
