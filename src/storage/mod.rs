//! Storage layer for Spendboard
//!
//! Defines the provider interfaces the expense store depends on, with JSON
//! file implementations (atomic writes, automatic directory creation) and
//! in-memory implementations.

pub mod budgets;
pub mod expenses;
pub mod file_io;
pub mod memory;

pub use budgets::JsonBudgetRepository;
pub use expenses::JsonExpenseRepository;
pub use file_io::DataFile;
pub use memory::{MemoryBudgetProvider, MemoryExpenseProvider};

use crate::config::paths::SpendboardPaths;
use crate::error::SpendboardResult;
use crate::models::{Budget, Expense, ExpenseId, NewExpense};

/// Source of expense records
pub trait ExpenseProvider {
    /// Every stored expense, in insertion order
    fn list_expenses(&self) -> SpendboardResult<Vec<Expense>>;

    /// Store a validated submission and return it with its assigned ID
    fn add_expense(&self, expense: NewExpense) -> SpendboardResult<Expense>;

    /// Remove an expense, returning the removed record
    fn delete_expense(&self, id: ExpenseId) -> SpendboardResult<Expense>;
}

/// Source of the budget
pub trait BudgetProvider {
    fn get_budgets(&self) -> SpendboardResult<Budget>;

    /// Replace the stored budget
    fn set_budgets(&self, budget: &Budget) -> SpendboardResult<()>;
}

/// Open the JSON providers under the data directory, creating it if needed
pub fn open_json(
    paths: &SpendboardPaths,
) -> SpendboardResult<(JsonExpenseRepository, JsonBudgetRepository)> {
    paths.ensure_directories()?;
    Ok((
        JsonExpenseRepository::new(paths.expenses_file()),
        JsonBudgetRepository::new(paths.budgets_file()),
    ))
}
