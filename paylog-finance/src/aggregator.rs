//! Monthly spending summary: filter a record snapshot by month, total it,
//! break it down by category, and compare it against the month's budget.

use chrono::{Local, NaiveDateTime};
use paylog_core::{BudgetRecord, ExpenseRecord, RawExpense, month_name, same_month};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month_selector::{MonthSelection, select_month};

/// Placeholder category used when a month has no expenses.
pub const NO_DATA_CATEGORY: &str = "No Data";

/// Running total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Everything the presentation layer needs for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Expenses in the selected month, in snapshot order
    pub expenses: Vec<ExpenseRecord>,
    pub total: Decimal,
    /// Category breakdown in first-seen order; never empty
    pub category_totals: Vec<CategoryTotal>,
    pub budget: Decimal,
    /// `budget - total`, may be negative
    pub balance: Decimal,
    pub over_budget: bool,
    pub selected_month: String,
    pub known_months: Vec<String>,
}

impl MonthlySummary {
    pub fn category_total(&self, category: &str) -> Option<Decimal> {
        self.category_totals
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
    }

    /// True when no expense fell in the selected month.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// Build a summary using the local wall clock for defaults.
pub fn build_summary(
    expenses: &[RawExpense],
    budgets: &[BudgetRecord],
    requested_month: Option<&str>,
) -> MonthlySummary {
    build_summary_at(expenses, budgets, requested_month, Local::now().naive_local())
}

/// Build a summary with an explicit "now".
///
/// `now` decides the default month and replaces unreadable record dates. For a
/// fixed `now` this is a pure function of its inputs.
pub fn build_summary_at(
    expenses: &[RawExpense],
    budgets: &[BudgetRecord],
    requested_month: Option<&str>,
    now: NaiveDateTime,
) -> MonthlySummary {
    let records = validate_expenses(expenses, now);
    let selection = select_month(requested_month, budgets, now.date());
    aggregate(records, selection)
}

/// Re-validate stored documents, dropping those without a usable amount.
pub fn validate_expenses(expenses: &[RawExpense], now: NaiveDateTime) -> Vec<ExpenseRecord> {
    expenses
        .iter()
        .filter_map(|raw| match raw.validate(now) {
            Ok(rec) => Some(rec),
            Err(err) => {
                tracing::warn!(%err, "skipping expense");
                None
            }
        })
        .collect()
}

/// Aggregate validated records for an already resolved month.
pub fn aggregate(records: Vec<ExpenseRecord>, selection: MonthSelection) -> MonthlySummary {
    let MonthSelection {
        month,
        budget,
        known_months,
    } = selection;

    let mut expenses: Vec<ExpenseRecord> = Vec::new();
    let mut total = Decimal::ZERO;
    let mut category_totals: Vec<CategoryTotal> = Vec::new();

    for r in records
        .into_iter()
        .filter(|r| same_month(&month_name(&r.date), &month))
    {
        let slot = category_totals.iter().position(|c| c.category == r.category);
        let category_sum = match slot {
            Some(i) => category_totals[i].amount.checked_add(r.amount),
            None => Some(r.amount),
        };

        // A record that would overflow the running sums is skipped like a corrupt one.
        let (Some(new_total), Some(category_sum)) = (total.checked_add(r.amount), category_sum)
        else {
            tracing::warn!(id = %r.id, amount = %r.amount, "skipping expense: total would overflow");
            continue;
        };

        total = new_total;
        match slot {
            Some(i) => category_totals[i].amount = category_sum,
            None => category_totals.push(CategoryTotal {
                category: r.category.clone(),
                amount: category_sum,
            }),
        }
        expenses.push(r);
    }

    if category_totals.is_empty() {
        category_totals.push(CategoryTotal {
            category: NO_DATA_CATEGORY.to_string(),
            amount: Decimal::ONE,
        });
    }

    // A zero budget means "no budget set" and never flags an overrun.
    let over_budget = !budget.is_zero() && total > budget;

    MonthlySummary {
        expenses,
        total,
        category_totals,
        budget,
        // total is never negative, so only the low end can overflow.
        balance: budget.checked_sub(total).unwrap_or(Decimal::MIN),
        over_budget,
        selected_month: month,
        known_months,
    }
}
