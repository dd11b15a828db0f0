//! Expense model
//!
//! An expense is an immutable record once stored: it is created from a
//! validated [`NewExpense`], appended to the store, and at most deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;
use super::payment::PaymentMethod;

/// Minimum trimmed length of a description
pub const MIN_DESCRIPTION_LEN: usize = 2;

/// A stored expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, assigned by the provider
    pub id: ExpenseId,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// One or more categories. Older single-category records are read from
    /// a `category` field holding a bare name.
    #[serde(alias = "category", deserialize_with = "one_or_many")]
    pub categories: Vec<Category>,

    pub description: String,

    /// Always positive
    pub amount: Money,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    /// When the expense was recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Materialize a validated submission under the given ID
    pub fn from_new(id: ExpenseId, new: NewExpense) -> Self {
        Self {
            id,
            date: new.date,
            categories: new.categories,
            description: new.description,
            amount: new.amount,
            payment_method: new.payment_method,
            wallet: new.wallet,
            notes: new.notes,
            tags: new.tags,
            created_at: Utc::now(),
        }
    }

    /// The first category, used for sorting and single-category views
    pub fn primary_category(&self) -> Option<Category> {
        self.categories.first().copied()
    }

    /// Exact match against any of this expense's category names
    pub fn has_category_named(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.as_str() == name)
    }

    /// Check a stored record against the submission rules
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        check_fields(self.amount, &self.categories, &self.description)
    }

    /// Comma separated category names
    pub fn category_label(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category_label(),
            self.amount
        )
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Category),
        Many(Vec<Category>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(category) => vec![category],
        OneOrMany::Many(categories) => categories,
    })
}

/// A user submission that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub categories: Vec<Category>,
    pub description: String,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub wallet: Option<String>,
    pub notes: Option<String>,
    pub tags: BTreeSet<String>,
}

impl NewExpense {
    /// Create a single-category submission paid in cash
    pub fn new(
        date: NaiveDate,
        category: Category,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            categories: vec![category],
            description: description.into(),
            amount,
            payment_method: PaymentMethod::default(),
            wallet: None,
            notes: None,
            tags: BTreeSet::new(),
        }
    }

    /// Tag the expense with an additional category
    pub fn also_in(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn paid_with(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = Some(wallet.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Parse an ISO `YYYY-MM-DD` date
    pub fn parse_date(s: &str) -> Result<NaiveDate, ExpenseValidationError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| ExpenseValidationError::InvalidDate(s.to_string()))
    }

    /// Strip markup and quoting characters from free text, drop duplicate
    /// categories, and turn blank optional fields into `None`
    pub fn sanitized(mut self) -> Self {
        self.description = sanitize_text(&self.description);
        self.wallet = self
            .wallet
            .map(|w| sanitize_text(&w))
            .filter(|w| !w.is_empty());
        self.notes = self
            .notes
            .map(|n| sanitize_text(&n))
            .filter(|n| !n.is_empty());
        self.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let mut seen = BTreeSet::new();
        self.categories.retain(|c| seen.insert(*c));
        self
    }

    /// Validate the submission
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        check_fields(self.amount, &self.categories, &self.description)
    }
}

/// Rules shared by submissions and stored records
fn check_fields(
    amount: Money,
    categories: &[Category],
    description: &str,
) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }

    if categories.is_empty() {
        return Err(ExpenseValidationError::NoCategory);
    }

    for (i, category) in categories.iter().enumerate() {
        if categories[..i].contains(category) {
            return Err(ExpenseValidationError::DuplicateCategory(*category));
        }
    }

    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ExpenseValidationError::DescriptionTooShort);
    }

    Ok(())
}

/// Remove `<...>` markup and the characters `;`, `'` and `"`, then trim
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(end) = rest.find('>') {
                rest = &rest[end + 1..];
                continue;
            }
        }
        if !matches!(c, ';' | '\'' | '"') {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    out.trim().to_string()
}

/// Validation errors for expense submissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    InvalidDate(String),
    NonPositiveAmount(Money),
    NoCategory,
    DuplicateCategory(Category),
    DescriptionTooShort,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate(s) => write!(f, "Invalid date '{}'. Use YYYY-MM-DD", s),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be a positive number (got {})", amount)
            }
            Self::NoCategory => write!(f, "At least one category is required"),
            Self::DuplicateCategory(category) => {
                write!(f, "Category {} is listed more than once", category)
            }
            Self::DescriptionTooShort => write!(
                f,
                "Description must be at least {} characters",
                MIN_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
