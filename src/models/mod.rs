//! Core data models for Spendboard
//!
//! This module contains the data structures of the expense domain:
//! expenses, categories, payment methods, budgets and money amounts.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod payment;

pub use budget::{Budget, BudgetValidationError};
pub use category::{Category, UnknownCategory};
pub use expense::{Expense, ExpenseValidationError, NewExpense};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use payment::PaymentMethod;
