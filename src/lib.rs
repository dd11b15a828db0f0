//! Spendboard - personal expense tracking with budget progress
//!
//! This library provides the core of the Spendboard expense dashboard: an
//! expense store fed by pluggable providers, pure aggregation over snapshots
//! of it, budget evaluation, and the terminal rendering used by the CLI.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Expenses, categories, payment methods, budgets, money
//! - `reports`: Windowed totals, groupings, budget status, chart series
//! - `services`: The expense store plus filtering and sorting
//! - `storage`: Provider traits with JSON file and in-memory implementations
//! - `clock`: Injected time source
//! - `config`: Path resolution and user settings
//! - `audit`: JSONL audit log of every change
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use spendboard::models::{Budget, Category, Money, NewExpense};
//! use spendboard::reports::{AggregationOptions, TimeWindow};
//! use spendboard::services::ExpenseStore;
//! use spendboard::storage::{MemoryBudgetProvider, MemoryExpenseProvider};
//!
//! let mut store = ExpenseStore::open(
//!     Box::new(MemoryExpenseProvider::new()),
//!     Box::new(MemoryBudgetProvider::new(Budget::starter())),
//! )?;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
//! store.add(NewExpense::new(today, Category::Food, "Lunch", Money::from_cents(3550)))?;
//!
//! let aggregator = store.aggregator(today, AggregationOptions::default());
//! assert_eq!(aggregator.total(TimeWindow::Today), Money::from_cents(3550));
//! # Ok::<(), spendboard::SpendboardError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendboardError, SpendboardResult};
