//! Expense and budget records, plus read-side validation of stored documents.
//!
//! Stored expense documents are loosely typed: `amount` may be a JSON number or a
//! numeric string, `date` may be an ISO date-time, an ISO date, or missing. Every
//! record read back is re-validated before it is aggregated.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

use crate::category::Category;

/// An expense about to be written to the store (no identity yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub category: String,
}

/// A validated expense read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Identity assigned by the store
    pub id: String,
    /// Always finite and positive
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub category: String,
}

/// One budget ceiling per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Calendar month name, compared case-insensitively
    pub month: String,
    /// May be zero
    pub amount: Decimal,
}

impl BudgetRecord {
    pub fn new(month: impl Into<String>, amount: Decimal) -> Self {
        Self {
            month: month.into(),
            amount,
        }
    }
}

/// An expense document exactly as the store hands it back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExpense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
}

impl RawExpense {
    /// Build the stored form of a freshly inserted expense.
    pub fn from_new(id: impl Into<String>, expense: &NewExpense) -> Self {
        Self {
            id: Some(id.into()),
            amount: Some(Value::String(expense.amount.to_string())),
            date: Some(Value::String(
                expense.date.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            )),
            category: Some(Value::String(expense.category.clone())),
        }
    }

    /// Re-validate a stored document.
    ///
    /// An unusable amount rejects the record. An unusable date is replaced by
    /// `now` so the record still lands in some month.
    pub fn validate(&self, now: NaiveDateTime) -> Result<ExpenseRecord, RecordError> {
        let id = self.id.clone().unwrap_or_default();

        let amount = coerce_amount(self.amount.as_ref()).map_err(|value| {
            RecordError::InvalidAmount {
                id: id.clone(),
                value,
            }
        })?;

        let date = match coerce_date(self.date.as_ref()) {
            Ok(d) => d,
            Err(value) => {
                let err = RecordError::InvalidDate {
                    id: id.clone(),
                    value,
                };
                tracing::warn!(%err, "substituting current time");
                now
            }
        };

        let category = match &self.category {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => Category::Other.to_string(),
            Some(other) => other.to_string(),
        };

        Ok(ExpenseRecord {
            id,
            amount,
            date,
            category,
        })
    }
}

/// Read-side validation failures. Both are recovered locally by the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("expense {id:?} has invalid amount {value}")]
    InvalidAmount { id: String, value: String },
    #[error("expense {id:?} has invalid date {value}")]
    InvalidDate { id: String, value: String },
}

/// Coerce a loosely typed amount into a positive decimal.
///
/// On failure returns a printable rendering of the offending value.
pub fn coerce_amount(value: Option<&Value>) -> Result<Decimal, String> {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };

    match parsed {
        Some(d) if d > Decimal::ZERO => Ok(d),
        _ => Err(value.map(Value::to_string).unwrap_or_else(|| "<missing>".to_string())),
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Coerce a loosely typed date into a naive date-time.
pub fn coerce_date(value: Option<&Value>) -> Result<NaiveDateTime, String> {
    match value {
        Some(Value::String(s)) => parse_iso_datetime(s.trim()).ok_or_else(|| format!("{s:?}")),
        Some(other) => Err(other.to_string()),
        None => Err("<missing>".to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        // Offsets are dropped: dates are naive local calendar dates.
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_amount_from_number_and_string() {
        assert_eq!(coerce_amount(Some(&json!(499))), Ok(dec!(499)));
        assert_eq!(coerce_amount(Some(&json!(12.5))), Ok(dec!(12.5)));
        assert_eq!(coerce_amount(Some(&json!(" 1250.00 "))), Ok(dec!(1250.00)));
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert!(coerce_amount(None).is_err());
        assert!(coerce_amount(Some(&json!(null))).is_err());
        assert!(coerce_amount(Some(&json!("abc"))).is_err());
        assert!(coerce_amount(Some(&json!("1,250"))).is_err());
        assert!(coerce_amount(Some(&json!(true))).is_err());
        assert!(coerce_amount(Some(&json!(0))).is_err());
        assert!(coerce_amount(Some(&json!(-10))).is_err());
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 29)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(coerce_date(Some(&json!("2025-07-29T10:00:00"))), Ok(expected));
        assert_eq!(coerce_date(Some(&json!("2025-07-29 10:00:00.000"))), Ok(expected));
        assert_eq!(coerce_date(Some(&json!("2025-07-29T10:00:00+05:30"))), Ok(expected));

        let midnight = NaiveDate::from_ymd_opt(2025, 7, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(coerce_date(Some(&json!("2025-07-29"))), Ok(midnight));
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert!(coerce_date(None).is_err());
        assert!(coerce_date(Some(&json!("yesterday"))).is_err());
        assert!(coerce_date(Some(&json!(1_700_000_000))).is_err());
    }

    #[test]
    fn test_validate_skips_bad_amount() {
        let raw = RawExpense {
            id: Some("e1".into()),
            amount: Some(json!("oops")),
            date: Some(json!("2025-07-01T00:00:00")),
            category: Some(json!("Food")),
        };
        let err = raw.validate(now()).unwrap_err();
        assert!(matches!(err, RecordError::InvalidAmount { ref id, .. } if id == "e1"));
    }

    #[test]
    fn test_validate_substitutes_bad_date() {
        let raw = RawExpense {
            id: Some("e2".into()),
            amount: Some(json!(10)),
            date: Some(json!("not a date")),
            category: None,
        };
        let rec = raw.validate(now()).unwrap();
        assert_eq!(rec.date, now());
        assert_eq!(rec.category, "Other");
        assert_eq!(rec.amount, dec!(10));
    }

    #[test]
    fn test_from_new_reads_back() {
        let new = NewExpense {
            amount: dec!(1250.00),
            date: now(),
            category: "Food".to_string(),
        };
        let rec = RawExpense::from_new("abc", &new).validate(now()).unwrap();
        assert_eq!(rec.id, "abc");
        assert_eq!(rec.amount, dec!(1250.00));
        assert_eq!(rec.date, now());
        assert_eq!(rec.category, "Food");
    }
}
