//! Transaction candidate models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Fixed set of spending categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Utilities,
    Income,
    Other,
}

impl Category {
    /// Display name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Income => "Income",
            Self::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A transaction derived from document text, not yet persisted.
///
/// `amount` is always a non-negative magnitude; the direction lives in `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCandidate {
    /// Absolute amount of the transaction.
    pub amount: Decimal,

    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Spending category.
    pub category: Category,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Calendar date of the transaction.
    pub date: NaiveDate,
}

impl TransactionCandidate {
    /// Build an expense candidate. Negative amounts are stored as their magnitude.
    pub fn expense(
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount: amount.abs(),
            kind: TransactionType::Expense,
            category,
            description: description.into(),
            date,
        }
    }

    /// Build a candidate from a signed amount: negative is an expense,
    /// zero or positive is income.
    pub fn from_signed(
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let kind = if amount.is_sign_negative() && !amount.is_zero() {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };

        Self {
            amount: amount.abs(),
            kind,
            category,
            description: description.into(),
            date,
        }
    }
}
