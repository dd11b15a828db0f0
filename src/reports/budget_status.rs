//! Budget evaluation
//!
//! Compares the month's spend against the budget, per category and overall,
//! and classifies each line as success, warning or danger.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Budget, Category, Money};

/// Percentage at which a line turns to warning
pub const WARNING_THRESHOLD: f64 = 80.0;

/// Percentage at which a line turns to danger
pub const DANGER_THRESHOLD: f64 = 100.0;

/// Budget health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Success,
    Warning,
    Danger,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= DANGER_THRESHOLD {
            Self::Danger
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Success
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spend against one limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub spent: Money,
    pub budget: Money,
    /// Share of the limit used, clamped to 0..=100; zero without a limit
    pub percentage: f64,
    /// Limit minus spend; negative when over budget
    pub remaining: Money,
    pub status: BudgetStatus,
}

impl BudgetProgress {
    pub fn compute(spent: Money, budget: Money) -> Self {
        let percentage = if budget.is_positive() {
            (spent.as_f64() / budget.as_f64() * 100.0).clamp(0.0, DANGER_THRESHOLD)
        } else {
            0.0
        };

        Self {
            spent,
            budget,
            percentage,
            remaining: budget - spent,
            status: BudgetStatus::from_percentage(percentage),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Where the overall monthly limit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitSource {
    /// The explicit overall monthly limit
    MonthlyLimit,
    /// The sum of the category limits
    CategorySum,
}

/// One category's progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryBudget {
    pub category: Category,
    pub progress: BudgetProgress,
}

/// Budget progress for a month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEvaluation {
    /// One line per category, in category order
    pub categories: Vec<CategoryBudget>,
    pub overall: BudgetProgress,
    pub overall_source: LimitSource,
}

impl BudgetEvaluation {
    /// Evaluate a month.
    ///
    /// `spent_by_category` is the month's category breakdown; `month_total`
    /// is the real amount spent in the month, which the overall line uses
    /// so that multi-category expenses are counted once.
    pub fn evaluate(
        spent_by_category: &BTreeMap<Category, Money>,
        month_total: Money,
        budget: &Budget,
    ) -> Self {
        let categories = Category::ALL
            .iter()
            .map(|&category| CategoryBudget {
                category,
                progress: BudgetProgress::compute(
                    spent_by_category.get(&category).copied().unwrap_or_default(),
                    budget.limit_for(category),
                ),
            })
            .collect();

        let (limit, overall_source) = match budget.monthly_limit.filter(|l| l.is_positive()) {
            Some(limit) => (limit, LimitSource::MonthlyLimit),
            None => (budget.category_total(), LimitSource::CategorySum),
        };

        Self {
            categories,
            overall: BudgetProgress::compute(month_total, limit),
            overall_source,
        }
    }

    pub fn get(&self, category: Category) -> Option<&BudgetProgress> {
        self.categories
            .iter()
            .find(|line| line.category == category)
            .map(|line| &line.progress)
    }

    /// Categories whose spend exceeds their limit
    pub fn over_budget(&self) -> impl Iterator<Item = &CategoryBudget> {
        self.categories.iter().filter(|line| line.progress.is_over_budget())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_over_budget_scenario() {
        let progress = BudgetProgress::compute(units(120), units(100));
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.status, BudgetStatus::Danger);
        assert_eq!(progress.remaining, units(-20));
        assert!(progress.is_over_budget());
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(BudgetProgress::compute(units(79), units(100)).status, BudgetStatus::Success);
        assert_eq!(BudgetProgress::compute(units(80), units(100)).status, BudgetStatus::Warning);
        assert_eq!(BudgetProgress::compute(units(99), units(100)).status, BudgetStatus::Warning);
        assert_eq!(BudgetProgress::compute(units(100), units(100)).status, BudgetStatus::Danger);
    }

    #[test]
    fn test_zero_budget_is_zero_percent() {
        let progress = BudgetProgress::compute(units(50), Money::zero());
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.status, BudgetStatus::Success);
        assert_eq!(progress.remaining, units(-50));
    }

    #[test]
    fn test_percentage_always_within_bounds() {
        for spent in [0, 1, 50, 99, 100, 101, 1_000, 1_000_000_000] {
            for budget in [0, 1, 100, 5_000] {
                let p = BudgetProgress::compute(Money::from_cents(spent), Money::from_cents(budget));
                assert!((0.0..=100.0).contains(&p.percentage), "{spent}/{budget}");
            }
        }
    }

    #[test]
    fn test_evaluation_lists_every_category() {
        let budget = Budget::new().with_limit(Category::Food, units(100));
        let spent = BTreeMap::from([(Category::Food, units(120))]);

        let evaluation = BudgetEvaluation::evaluate(&spent, units(120), &budget);

        assert_eq!(evaluation.categories.len(), Category::ALL.len());
        let food = evaluation.get(Category::Food).unwrap();
        assert_eq!(food.status, BudgetStatus::Danger);
        assert_eq!(food.remaining, units(-20));
        assert_eq!(evaluation.over_budget().count(), 1);

        let shopping = evaluation.get(Category::Shopping).unwrap();
        assert_eq!(shopping.spent, Money::zero());
        assert_eq!(shopping.percentage, 0.0);
    }

    #[test]
    fn test_overall_prefers_explicit_monthly_limit() {
        let budget = Budget::new()
            .with_limit(Category::Food, units(100))
            .with_limit(Category::Shopping, units(100))
            .with_monthly_limit(units(500));
        let evaluation = BudgetEvaluation::evaluate(&BTreeMap::new(), units(450), &budget);

        assert_eq!(evaluation.overall_source, LimitSource::MonthlyLimit);
        assert_eq!(evaluation.overall.budget, units(500));
        assert_eq!(evaluation.overall.percentage, 90.0);
        assert_eq!(evaluation.overall.status, BudgetStatus::Warning);
    }

    #[test]
    fn test_overall_falls_back_to_category_sum() {
        let budget = Budget::new()
            .with_limit(Category::Food, units(100))
            .with_limit(Category::Shopping, units(100))
            .with_monthly_limit(Money::zero());
        let evaluation = BudgetEvaluation::evaluate(&BTreeMap::new(), units(50), &budget);

        assert_eq!(evaluation.overall_source, LimitSource::CategorySum);
        assert_eq!(evaluation.overall.budget, units(200));
        assert_eq!(evaluation.overall.percentage, 25.0);
        assert_eq!(evaluation.overall.status, BudgetStatus::Success);
    }
}
