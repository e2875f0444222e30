use chrono::NaiveDateTime;
use paylog_core::{Category, NewExpense};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized output of the message parser (ephemeral, never stored as-is)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// Always positive
    pub amount: Decimal,
    /// Date found in the message text, or the parse-time fallback.
    pub date: NaiveDateTime,
    pub category: Category,
}

impl ParsedTransaction {
    /// Turn the parse result into a storable expense dated `recorded_at`.
    ///
    /// The message date is discarded on purpose: an expense is counted in the
    /// month it was recorded, not the month the message mentions.
    pub fn into_new_expense(self, recorded_at: NaiveDateTime) -> NewExpense {
        NewExpense {
            amount: self.amount,
            date: recorded_at,
            category: self.category.to_string(),
        }
    }
}

/// Why a message could not be turned into a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no currency-marked amount found in message")]
    NoAmount,
    #[error("amount {raw:?} is not a valid number")]
    InvalidAmount { raw: String },
    #[error("amount {amount} must be greater than zero")]
    NonPositiveAmount { amount: Decimal },
}
