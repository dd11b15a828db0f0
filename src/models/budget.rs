//! Budget model
//!
//! A budget is a per-category monthly limit plus an optional overall monthly
//! limit. It is always replaced as a whole.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::category::Category;
use super::money::Money;

/// Monthly spending limits
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Budget {
    /// Limit per category; a missing entry means no limit (zero)
    #[serde(default)]
    pub limits: BTreeMap<Category, Money>,

    /// Explicit overall monthly limit. When absent or zero the overall
    /// limit is the sum of the category limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<Money>,
}

impl Budget {
    /// An empty budget (no limits)
    pub fn new() -> Self {
        Self::default()
    }

    /// The budget a fresh installation starts with
    pub fn starter() -> Self {
        let limits = [
            (Category::Food, 250),
            (Category::Transportation, 150),
            (Category::Entertainment, 200),
            (Category::Shopping, 300),
            (Category::Utilities, 150),
            (Category::Healthcare, 100),
            (Category::Others, 100),
        ]
        .into_iter()
        .map(|(category, units)| (category, Money::from_units(units)))
        .collect();

        Self {
            limits,
            monthly_limit: None,
        }
    }

    pub fn with_limit(mut self, category: Category, limit: Money) -> Self {
        self.limits.insert(category, limit);
        self
    }

    pub fn with_monthly_limit(mut self, limit: Money) -> Self {
        self.monthly_limit = Some(limit);
        self
    }

    /// Limit for a category, zero when unset
    pub fn limit_for(&self, category: Category) -> Money {
        self.limits.get(&category).copied().unwrap_or_default()
    }

    /// Sum of every category limit
    pub fn category_total(&self) -> Money {
        self.limits.values().sum()
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if let Some((category, limit)) = self.limits.iter().find(|(_, l)| l.is_negative()) {
            return Err(BudgetValidationError::NegativeLimit {
                category: *category,
                limit: *limit,
            });
        }

        if let Some(limit) = self.monthly_limit.filter(|l| l.is_negative()) {
            return Err(BudgetValidationError::NegativeMonthlyLimit(limit));
        }

        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit { category: Category, limit: Money },
    NegativeMonthlyLimit(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit { category, limit } => {
                write!(f, "Budget for {} cannot be negative ({})", category, limit)
            }
            Self::NegativeMonthlyLimit(limit) => {
                write!(f, "Monthly limit cannot be negative ({})", limit)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
