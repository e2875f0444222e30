//! paylog-finance: month selection, monthly spending summaries, store-backed
//! recording workflows, and CSV export.

pub mod aggregator;
pub mod export;
pub mod month_selector;
pub mod tracker;

pub use aggregator::{
    CategoryTotal, MonthlySummary, NO_DATA_CATEGORY, aggregate, build_summary, build_summary_at,
};
pub use export::write_expenses_csv;
pub use month_selector::{MonthSelection, select_month};
pub use tracker::{RecordedExpense, Tracker, TrackerError, TrackerResult};
