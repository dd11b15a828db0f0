//! Expense repository for JSON storage
//!
//! Manages `expenses.json`. Records are kept in insertion order; every call
//! reads the file so the repository never serves stale data.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::file_io::DataFile;
use super::ExpenseProvider;
use crate::error::{SpendboardError, SpendboardResult};
use crate::models::{Expense, ExpenseId, NewExpense};

/// Serializable expense file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// File-backed expense provider
pub struct JsonExpenseRepository {
    file: DataFile,
}

impl JsonExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: DataFile::new(path, "expenses"),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn load(&self) -> SpendboardResult<ExpenseData> {
        self.file.load()
    }
}

impl ExpenseProvider for JsonExpenseRepository {
    fn list_expenses(&self) -> SpendboardResult<Vec<Expense>> {
        let data = self.load()?;
        debug!(count = data.expenses.len(), "loaded expenses");
        Ok(data.expenses)
    }

    fn add_expense(&self, expense: NewExpense) -> SpendboardResult<Expense> {
        let mut data = self.load()?;
        let expense = Expense::from_new(ExpenseId::new(), expense);
        data.expenses.push(expense.clone());
        self.file.save(&data)?;
        Ok(expense)
    }

    fn delete_expense(&self, id: ExpenseId) -> SpendboardResult<Expense> {
        let mut data = self.load()?;
        let position = data
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SpendboardError::expense_not_found(id.to_string()))?;
        let removed = data.expenses.remove(position);
        self.file.save(&data)?;
        Ok(removed)
    }
}
