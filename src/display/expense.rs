//! Expense and budget tables
//!
//! Listings are rendered with `tabled`; row numbers are 1-based positions in
//! the listing, which `expense delete --index` accepts.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use super::report::{format_percentage, truncate};
use crate::models::{Budget, Category, Expense};
use crate::reports::BudgetEvaluation;

/// Format a listing of expenses as a table
pub fn format_expense_table(expenses: &[&Expense], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "ID", "Date", "Category", "Description", "Amount", "Paid"]);

    for (i, expense) in expenses.iter().enumerate() {
        let categories = expense
            .categories
            .iter()
            .map(|c| format!("{} {}", c.icon(), c))
            .collect::<Vec<_>>()
            .join(", ");

        builder.push_record([
            (i + 1).to_string(),
            expense.id.to_string(),
            expense.date.format("%Y-%m-%d").to_string(),
            categories,
            truncate(&expense.description, 32),
            expense.amount.format_with_symbol(currency_symbol),
            expense.payment_method.label().to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(5)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format one expense with all of its fields
pub fn format_expense_details(expense: &Expense, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Category:    {}\n", expense.category_label()));
    output.push_str(&format!("Paid with:   {}\n", expense.payment_method));

    if let Some(wallet) = &expense.wallet {
        output.push_str(&format!("Wallet:      {}\n", wallet));
    }

    if let Some(notes) = &expense.notes {
        output.push_str(&format!("Notes:       {}\n", notes));
    }

    if !expense.tags.is_empty() {
        let tags: Vec<&str> = expense.tags.iter().map(String::as_str).collect();
        output.push_str(&format!("Tags:        {}\n", tags.join(", ")));
    }

    output
}

/// Format the configured limits next to this month's progress
pub fn format_budget_table(
    budget: &Budget,
    evaluation: &BudgetEvaluation,
    currency_symbol: &str,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Category", "Limit", "Spent", "Remaining", "Used", "Status"]);

    for line in &evaluation.categories {
        let progress = &line.progress;
        builder.push_record([
            format!("{} {}", line.category.icon(), line.category),
            limit_cell(budget, line.category, currency_symbol),
            progress.spent.format_with_symbol(currency_symbol),
            progress.remaining.format_with_symbol(currency_symbol),
            format_percentage(progress.percentage),
            progress.status.to_string(),
        ]);
    }

    let overall = &evaluation.overall;
    builder.push_record([
        "Overall".to_string(),
        overall.budget.format_with_symbol(currency_symbol),
        overall.spent.format_with_symbol(currency_symbol),
        overall.remaining.format_with_symbol(currency_symbol),
        format_percentage(overall.percentage),
        overall.status.to_string(),
    ]);

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()));

    let mut output = format!("{}\n", table);
    match budget.monthly_limit {
        Some(limit) if limit.is_positive() => output.push_str(&format!(
            "Monthly limit: {}\n",
            limit.format_with_symbol(currency_symbol)
        )),
        _ => output.push_str("Monthly limit: sum of category limits\n"),
    }
    output
}

fn limit_cell(budget: &Budget, category: Category, currency_symbol: &str) -> String {
    let limit = budget.limit_for(category);
    if limit.is_zero() {
        "-".to_string()
    } else {
        limit.format_with_symbol(currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money, NewExpense, PaymentMethod};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn lunch() -> Expense {
        Expense::from_new(
            ExpenseId::new(),
            NewExpense::new(
                NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
                Category::Food,
                "Lunch at cafe",
                Money::from_cents(3550),
            )
            .also_in(Category::Entertainment)
            .paid_with(PaymentMethod::Upi)
            .with_notes("team outing")
            .with_tag("work"),
        )
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_expense_table(&[], "$"), "No expenses found.\n");
    }

    #[test]
    fn test_expense_table_rows() {
        let expense = lunch();
        let table = format_expense_table(&[&expense], "₹");

        assert!(table.contains("Lunch at cafe"));
        assert!(table.contains("₹35.50"));
        assert!(table.contains("🍔 Food, 🎬 Entertainment"));
        assert!(table.contains("UPI"));
        assert!(table.contains(&expense.id.to_string()));
    }

    #[test]
    fn test_expense_details() {
        let details = format_expense_details(&lunch(), "$");
        assert!(details.contains("Category:    Food, Entertainment"));
        assert!(details.contains("Notes:       team outing"));
        assert!(details.contains("Tags:        work"));
        assert!(!details.contains("Wallet"));
    }

    #[test]
    fn test_budget_table() {
        let budget = Budget::new().with_limit(Category::Food, Money::from_units(100));
        let mut spent = BTreeMap::new();
        spent.insert(Category::Food, Money::from_units(85));
        let evaluation = BudgetEvaluation::evaluate(&spent, Money::from_units(85), &budget);

        let table = format_budget_table(&budget, &evaluation, "$");
        assert!(table.contains("warning"));
        assert!(table.contains("$15.00"));
        assert!(table.contains("Monthly limit: sum of category limits"));
    }
}
