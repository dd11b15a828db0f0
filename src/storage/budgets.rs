//! Budget repository for JSON storage
//!
//! Manages `budgets.json`. Until a budget has been saved the repository
//! hands out the starter budget.

use std::path::PathBuf;

use super::file_io::DataFile;
use super::BudgetProvider;
use crate::error::SpendboardResult;
use crate::models::Budget;

/// File-backed budget provider
pub struct JsonBudgetRepository {
    file: DataFile,
}

impl JsonBudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: DataFile::new(path, "budget"),
        }
    }
}

impl BudgetProvider for JsonBudgetRepository {
    fn get_budgets(&self) -> SpendboardResult<Budget> {
        Ok(self.file.load_optional()?.unwrap_or_else(Budget::starter))
    }

    fn set_budgets(&self, budget: &Budget) -> SpendboardResult<()> {
        self.file.save(budget)
    }
}
