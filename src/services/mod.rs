//! Service layer for Spendboard
//!
//! The store owns the expense snapshot and routes every mutation through the
//! providers; the filter module narrows and orders listings.

pub mod filter;
pub mod store;

pub use filter::{sort_expenses, ExpenseFilter, SortField, SortOrder};
pub use store::ExpenseStore;
