//! paylog-core: shared records, category taxonomy, month helpers, and the store interface

pub mod category;
pub mod month;
pub mod record;
pub mod store;

pub use category::{Category, classify};
pub use month::{month_name, normalize_month, same_month};
pub use record::{BudgetRecord, ExpenseRecord, NewExpense, RawExpense, RecordError};
pub use store::{ExpenseStore, MemoryStore, StoreError, StoreResult, new_record_id, upsert_budget_in};
