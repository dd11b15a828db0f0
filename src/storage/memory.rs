//! In-memory providers
//!
//! Useful for embedding the dashboard without a data directory, and for tests.

use std::sync::RwLock;

use super::{BudgetProvider, ExpenseProvider};
use crate::error::{SpendboardError, SpendboardResult};
use crate::models::{Budget, Expense, ExpenseId, NewExpense};

/// Expense provider backed by a vector
#[derive(Default)]
pub struct MemoryExpenseProvider {
    expenses: RwLock<Vec<Expense>>,
}

impl MemoryExpenseProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing records (kept in the given order)
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            expenses: RwLock::new(expenses),
        }
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> SpendboardError {
    SpendboardError::Provider(format!("Failed to acquire lock: {}", e))
}

impl ExpenseProvider for MemoryExpenseProvider {
    fn list_expenses(&self) -> SpendboardResult<Vec<Expense>> {
        Ok(self.expenses.read().map_err(lock_error)?.clone())
    }

    fn add_expense(&self, expense: NewExpense) -> SpendboardResult<Expense> {
        let expense = Expense::from_new(ExpenseId::new(), expense);
        self.expenses
            .write()
            .map_err(lock_error)?
            .push(expense.clone());
        Ok(expense)
    }

    fn delete_expense(&self, id: ExpenseId) -> SpendboardResult<Expense> {
        let mut expenses = self.expenses.write().map_err(lock_error)?;
        let position = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SpendboardError::expense_not_found(id.to_string()))?;
        Ok(expenses.remove(position))
    }
}

/// Budget provider holding one budget
pub struct MemoryBudgetProvider {
    budget: RwLock<Budget>,
}

impl MemoryBudgetProvider {
    pub fn new(budget: Budget) -> Self {
        Self {
            budget: RwLock::new(budget),
        }
    }
}

impl Default for MemoryBudgetProvider {
    fn default() -> Self {
        Self::new(Budget::starter())
    }
}

impl BudgetProvider for MemoryBudgetProvider {
    fn get_budgets(&self) -> SpendboardResult<Budget> {
        Ok(self.budget.read().map_err(lock_error)?.clone())
    }

    fn set_budgets(&self, budget: &Budget) -> SpendboardResult<()> {
        *self.budget.write().map_err(lock_error)? = budget.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_memory_expense_round_trip() {
        let provider = MemoryExpenseProvider::new();
        let added = provider
            .add_expense(NewExpense::new(
                NaiveDate::from_ymd_opt(2024, 12, 3).unwrap(),
                Category::Utilities,
                "Internet bill",
                Money::from_cents(7999),
            ))
            .unwrap();

        assert_eq!(provider.list_expenses().unwrap(), vec![added.clone()]);
        provider.delete_expense(added.id).unwrap();
        assert!(provider.list_expenses().unwrap().is_empty());
        assert!(provider.delete_expense(added.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_memory_budget_defaults_to_starter() {
        let provider = MemoryBudgetProvider::default();
        assert_eq!(provider.get_budgets().unwrap(), Budget::starter());

        provider.set_budgets(&Budget::new()).unwrap();
        assert_eq!(provider.get_budgets().unwrap(), Budget::new());
    }
}
