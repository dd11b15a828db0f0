//! Filtering and sorting of expense listings
//!
//! Both operate on a snapshot slice and never reorder what they keep:
//! filtering preserves insertion order and sorting is stable in both
//! directions.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::Expense;

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the description or any category name
    pub search: Option<String>,
    /// Exact category name; an unknown name matches nothing
    pub category: Option<String>,
    /// Exact payment method label
    pub payment_method: Option<String>,
    /// `YYYY-MM` prefix of the ISO date
    pub month: Option<String>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    pub fn payment_method(mut self, label: impl Into<String>) -> Self {
        self.payment_method = Some(label.into());
        self
    }

    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.payment_method.is_none()
            && self.month.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Short human description of the active criteria, `None` when empty
    pub fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(search) = &self.search {
            parts.push(format!("matching \"{}\"", search));
        }
        if let Some(category) = &self.category {
            parts.push(format!("category {}", category));
        }
        if let Some(method) = &self.payment_method {
            parts.push(format!("paid by {}", method));
        }
        if let Some(month) = &self.month {
            parts.push(format!("month {}", month));
        }
        if let Some(start) = self.start_date {
            parts.push(format!("from {}", start));
        }
        if let Some(end) = self.end_date {
            parts.push(format!("to {}", end));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Whether a single expense passes every criterion
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_description = expense.description.to_lowercase().contains(&needle);
            let in_category = expense
                .categories
                .iter()
                .any(|c| c.as_str().to_lowercase().contains(&needle));
            if !in_description && !in_category {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !expense.has_category_named(category) {
                return false;
            }
        }

        if let Some(method) = &self.payment_method {
            if expense.payment_method.label() != method {
                return false;
            }
        }

        if let Some(month) = &self.month {
            if !expense.date.format("%Y-%m-%d").to_string().starts_with(month.as_str()) {
                return false;
            }
        }

        if let Some(start) = self.start_date {
            if expense.date < start {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if expense.date > end {
                return false;
            }
        }

        true
    }

    /// The matching expenses, in their original order
    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Sort key for expense listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    /// By the first category's name
    Category,
    Amount,
    /// Case-insensitive
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

fn compare(a: &Expense, b: &Expense, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Category => {
            let name = |e: &Expense| e.primary_category().map(|c| c.as_str()).unwrap_or("");
            name(a).cmp(name(b))
        }
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Description => a
            .description
            .to_lowercase()
            .cmp(&b.description.to_lowercase()),
    }
}

/// Stable sort; expenses with equal keys keep their relative order in both
/// directions
pub fn sort_expenses(expenses: &mut [&Expense], field: SortField, order: SortOrder) {
    match order {
        SortOrder::Asc => expenses.sort_by(|a, b| compare(a, b, field)),
        SortOrder::Desc => expenses.sort_by(|a, b| compare(b, a, field)),
    }
}
