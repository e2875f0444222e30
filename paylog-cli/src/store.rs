//! File-backed document store: one JSON file holding expenses and budgets.
//!
//! Writes go to a sibling `.tmp` file and are renamed into place.

use paylog_core::{
    BudgetRecord, ExpenseStore, NewExpense, RawExpense, StoreError, StoreResult, new_record_id,
    upsert_budget_in,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    expenses: Vec<RawExpense>,
    #[serde(default)]
    budgets: Vec<BudgetRecord>,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    guard: Mutex<()>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn read(&self) -> StoreResult<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(StoreDocument::default());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write(&self, doc: &StoreDocument) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(doc)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ExpenseStore for JsonFileStore {
    fn insert_expense(&self, expense: &NewExpense) -> StoreResult<String> {
        let _guard = self.lock()?;
        let mut doc = self.read()?;
        let id = new_record_id();
        doc.expenses.push(RawExpense::from_new(id.clone(), expense));
        self.write(&doc)?;
        Ok(id)
    }

    fn query_all_expenses(&self) -> StoreResult<Vec<RawExpense>> {
        let _guard = self.lock()?;
        Ok(self.read()?.expenses)
    }

    fn query_all_budgets(&self) -> StoreResult<Vec<BudgetRecord>> {
        let _guard = self.lock()?;
        Ok(self.read()?.budgets)
    }

    fn upsert_budget(&self, month: &str, amount: Decimal) -> StoreResult<()> {
        let _guard = self.lock()?;
        let mut doc = self.read()?;
        upsert_budget_in(&mut doc.budgets, month, amount);
        self.write(&doc)
    }
}
