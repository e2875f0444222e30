//! Resolve which month (and which budget) a summary is built for.

use chrono::NaiveDate;
use paylog_core::{BudgetRecord, month_name, same_month};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of month resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSelection {
    /// Month the summary filters on
    pub month: String,
    /// Budget ceiling for that month, zero when no budgets exist
    pub budget: Decimal,
    /// Lexically sorted month names that carry a budget
    pub known_months: Vec<String>,
}

/// Pick the effective month and budget.
///
/// 1. No requested month: use `today`'s month name (e.g. `"july"`).
/// 2. A budget whose month matches case-insensitively: use it.
/// 3. Otherwise, if any budget exists: use the budget whose month name is the
///    greatest *string*, and switch to that month. This is alphabetical order,
///    so `"october"` beats `"march"` but `"september"` beats `"december"`.
/// 4. No budgets at all: budget is zero, month stays as requested.
pub fn select_month(
    requested: Option<&str>,
    budgets: &[BudgetRecord],
    today: NaiveDate,
) -> MonthSelection {
    let mut known_months: Vec<String> = budgets.iter().map(|b| b.month.clone()).collect();
    known_months.sort();

    let requested = requested
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| month_name(&today));

    if let Some(b) = budgets.iter().find(|b| same_month(&b.month, &requested)) {
        return MonthSelection {
            month: requested,
            budget: b.amount,
            known_months,
        };
    }

    // rev() so that ties resolve to the first record, as max_by keeps the last.
    match budgets.iter().rev().max_by(|a, b| a.month.cmp(&b.month)) {
        Some(latest) => {
            tracing::debug!(
                requested = %requested,
                fallback = %latest.month,
                "no budget for requested month, using greatest month name"
            );
            MonthSelection {
                month: latest.month.to_lowercase(),
                budget: latest.amount,
                known_months,
            }
        }
        None => MonthSelection {
            month: requested,
            budget: Decimal::ZERO,
            known_months,
        },
    }
}
