//! Store-backed workflows: record a message, set a budget, summarize a month.
//!
//! The tracker owns an injected [`ExpenseStore`]; parsing and aggregation stay
//! pure and only ever see plain snapshots.

use chrono::{Local, NaiveDateTime};
use paylog_core::{BudgetRecord, ExpenseStore, NewExpense, StoreError, normalize_month};
use paylog_ingest::{ParseFailure, ParsedTransaction, parse_message_at};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::aggregator::{MonthlySummary, build_summary_at};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("could not parse message: {0}")]
    Parse(#[from] ParseFailure),
    #[error("budget amount {raw:?} is not a number")]
    InvalidBudgetAmount { raw: String },
    #[error("budget amount {amount} must not be negative")]
    NegativeBudget { amount: Decimal },
    #[error("budget month must not be empty")]
    EmptyMonth,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

/// A message that was parsed and written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedExpense {
    pub id: String,
    pub parsed: ParsedTransaction,
    pub stored: NewExpense,
}

pub struct Tracker<S> {
    store: S,
}

impl<S: ExpenseStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn record_message(&self, text: &str) -> TrackerResult<RecordedExpense> {
        self.record_message_at(text, Local::now().naive_local())
    }

    /// Parse `text` and insert it, dated `now` regardless of the message date.
    pub fn record_message_at(&self, text: &str, now: NaiveDateTime) -> TrackerResult<RecordedExpense> {
        let parsed = parse_message_at(text, now)?;
        let stored = parsed.clone().into_new_expense(now);

        let id = self.store.insert_expense(&stored)?;
        tracing::info!(%id, amount = %stored.amount, category = %stored.category, "expense recorded");

        Ok(RecordedExpense { id, parsed, stored })
    }

    /// Validate a submitted budget form and upsert it by normalized month.
    pub fn set_budget(&self, month: &str, amount: &str) -> TrackerResult<BudgetRecord> {
        let month = normalize_month(month);
        if month.is_empty() {
            return Err(TrackerError::EmptyMonth);
        }

        let amount = parse_budget_amount(amount)?;
        self.store.upsert_budget(&month, amount)?;
        tracing::info!(%month, %amount, "budget saved");

        Ok(BudgetRecord::new(month, amount))
    }

    pub fn summary(&self, requested_month: Option<&str>) -> TrackerResult<MonthlySummary> {
        self.summary_at(requested_month, Local::now().naive_local())
    }

    /// Take fresh snapshots from the store and aggregate them.
    pub fn summary_at(
        &self,
        requested_month: Option<&str>,
        now: NaiveDateTime,
    ) -> TrackerResult<MonthlySummary> {
        let expenses = self.store.query_all_expenses()?;
        let budgets = self.store.query_all_budgets()?;
        Ok(build_summary_at(&expenses, &budgets, requested_month, now))
    }
}

/// Parse a budget form field. Zero is allowed; negatives and garbage are not.
pub fn parse_budget_amount(raw: &str) -> TrackerResult<Decimal> {
    let trimmed = raw.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| TrackerError::InvalidBudgetAmount {
            raw: raw.to_string(),
        })?;

    if amount < Decimal::ZERO {
        return Err(TrackerError::NegativeBudget { amount });
    }
    Ok(amount)
}
