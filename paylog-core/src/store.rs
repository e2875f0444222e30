//! Store collaborator interface.
//!
//! The core never owns storage: callers inject an [`ExpenseStore`] and hand plain
//! snapshots to the parser/aggregator.

use rust_decimal::Decimal;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

use crate::month::normalize_month;
use crate::record::{BudgetRecord, NewExpense, RawExpense};

/// Any failure reported by a store backend. Never retried here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Document-store operations the expense tracker relies on.
pub trait ExpenseStore: Send + Sync {
    /// Insert an expense, returning the identity assigned to it.
    fn insert_expense(&self, expense: &NewExpense) -> StoreResult<String>;

    /// Every stored expense, loosely typed.
    fn query_all_expenses(&self) -> StoreResult<Vec<RawExpense>>;

    fn query_all_budgets(&self) -> StoreResult<Vec<BudgetRecord>>;

    /// Replace-or-insert keyed by the normalized month name.
    fn upsert_budget(&self, month: &str, amount: Decimal) -> StoreResult<()>;
}

/// Fresh identity for an inserted expense.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Apply upsert-by-month semantics to an in-memory budget list.
pub fn upsert_budget_in(budgets: &mut Vec<BudgetRecord>, month: &str, amount: Decimal) {
    let key = normalize_month(month);
    match budgets.iter_mut().find(|b| normalize_month(&b.month) == key) {
        Some(existing) => {
            existing.month = key;
            existing.amount = amount;
        }
        None => budgets.push(BudgetRecord::new(key, amount)),
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    expenses: Vec<RawExpense>,
    budgets: Vec<BudgetRecord>,
}

/// Process-local store, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document as-is, bypassing validation (e.g. a corrupt legacy row).
    pub fn push_raw_expense(&self, raw: RawExpense) -> StoreResult<()> {
        self.lock()?.expenses.push(raw);
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl ExpenseStore for MemoryStore {
    fn insert_expense(&self, expense: &NewExpense) -> StoreResult<String> {
        let id = new_record_id();
        self.lock()?
            .expenses
            .push(RawExpense::from_new(id.clone(), expense));
        Ok(id)
    }

    fn query_all_expenses(&self) -> StoreResult<Vec<RawExpense>> {
        Ok(self.lock()?.expenses.clone())
    }

    fn query_all_budgets(&self) -> StoreResult<Vec<BudgetRecord>> {
        Ok(self.lock()?.budgets.clone())
    }

    fn upsert_budget(&self, month: &str, amount: Decimal) -> StoreResult<()> {
        upsert_budget_in(&mut self.lock()?.budgets, month, amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_upsert_replaces_by_normalized_month() {
        let store = MemoryStore::new();
        store.upsert_budget("July", dec!(5000)).unwrap();
        store.upsert_budget(" july ", dec!(7000)).unwrap();
        store.upsert_budget("march", dec!(100)).unwrap();

        let budgets = store.query_all_budgets().unwrap();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0], BudgetRecord::new("july", dec!(7000)));
        assert_eq!(budgets[1], BudgetRecord::new("march", dec!(100)));
    }

    #[test]
    fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let expense = NewExpense {
            amount: dec!(10),
            date: NaiveDate::from_ymd_opt(2025, 7, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            category: "Other".to_string(),
        };
        let a = store.insert_expense(&expense).unwrap();
        let b = store.insert_expense(&expense).unwrap();
        assert_ne!(a, b);

        let all = store.query_all_expenses().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id.as_deref(), Some(a.as_str()));
    }
}
