//! Month-name helpers. Budget months are keyed by full, lower-cased names.

use chrono::{Datelike, Month};

/// Full lower-cased month name of a date, e.g. `"july"`.
pub fn month_name<D: Datelike>(date: &D) -> String {
    Month::try_from(date.month() as u8)
        .map(|m| m.name().to_lowercase())
        .unwrap_or_default()
}

/// Normalize a user-supplied month key: trimmed and lower-cased.
pub fn normalize_month(month: &str) -> String {
    month.trim().to_lowercase()
}

/// Case-insensitive month-name comparison, ignoring surrounding whitespace.
pub fn same_month(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
