//! CSV export of a month's expenses.
//!
//! Columns: id,date,category,amount

use csv::Writer;
use serde::Serialize;
use std::io::Write;

use crate::aggregator::MonthlySummary;

#[derive(Debug, Serialize)]
struct ExpenseRow<'a> {
    id: &'a str,
    date: String,
    category: &'a str,
    amount: String,
}

/// Write the summary's expenses as CSV rows, header first.
pub fn write_expenses_csv<W: Write>(summary: &MonthlySummary, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for e in &summary.expenses {
        wtr.serialize(ExpenseRow {
            id: &e.id,
            date: e.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            category: &e.category,
            amount: e.amount.to_string(),
        })?;
    }

    if summary.expenses.is_empty() {
        wtr.write_record(["id", "date", "category", "amount"])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::build_summary_at;
    use chrono::NaiveDate;
    use paylog_core::RawExpense;
    use serde_json::json;

    fn now() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_export_rows() {
        let expenses = vec![
            RawExpense {
                id: Some("a1".into()),
                amount: Some(json!("1250.00")),
                date: Some(json!("2025-07-29T10:00:00")),
                category: Some(json!("Food, takeaway")),
            },
            RawExpense {
                id: Some("a2".into()),
                amount: Some(json!(80)),
                date: Some(json!("2025-06-01T10:00:00")),
                category: Some(json!("Food")),
            },
        ];
        let summary = build_summary_at(&expenses, &[], Some("july"), now());

        let mut out = Vec::new();
        write_expenses_csv(&summary, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "id,date,category,amount\na1,2025-07-29 10:00:00,\"Food, takeaway\",1250.00\n"
        );
    }

    #[test]
    fn test_export_empty_month_has_header() {
        let summary = build_summary_at(&[], &[], Some("july"), now());
        let mut out = Vec::new();
        write_expenses_csv(&summary, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id,date,category,amount\n");
    }
}
