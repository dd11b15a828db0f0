//! Expense categories
//!
//! Categories form a fixed, closed set. Budgets hold one limit per category
//! and the category chart always lists every one of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Utilities,
    Healthcare,
    Others,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Healthcare,
        Category::Others,
    ];

    /// The canonical name, as stored and as matched by filters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Others => "Others",
        }
    }

    /// Icon shown next to the category in listings and charts
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Transportation => "🚗",
            Self::Entertainment => "🎬",
            Self::Shopping => "🛍️",
            Self::Utilities => "⚡",
            Self::Healthcare => "🏥",
            Self::Others => "📦",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        write!(
            f,
            "Invalid category '{}'. Must be one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive lookup, used for user input
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
