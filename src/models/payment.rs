//! Payment methods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
    ];

    /// The label used in storage and matched exactly by filters
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PaymentMethod::ALL
            .iter()
            .copied()
            .find(|m| {
                m.label().eq_ignore_ascii_case(needle)
                    || m.label().replace(' ', "").eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| {
                let labels: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
                format!(
                    "Invalid payment method '{}'. Must be one of: {}",
                    s,
                    labels.join(", ")
                )
            })
    }
}
