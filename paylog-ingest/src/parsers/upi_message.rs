//! Payment-notification parser: amount + date + category from free-form text.
//!
//! Example input:
//!   Paid Rs. 1,250.00 to Zomato on 29-Jul-25 via UPI Ref 5123

use chrono::{Local, NaiveDateTime};
use paylog_core::classify;

use crate::parsers::amount::find_amount;
use crate::parsers::date::extract_date_or;
use crate::types::{ParseFailure, ParsedTransaction};

/// Parse a payment message, falling back to the local wall clock for the date.
pub fn parse_message(text: &str) -> Result<ParsedTransaction, ParseFailure> {
    parse_message_at(text, Local::now().naive_local())
}

/// Parse a payment message with an explicit "now" for the date fallback.
///
/// Fails only when no usable amount is present; date and category always
/// resolve to something.
pub fn parse_message_at(text: &str, now: NaiveDateTime) -> Result<ParsedTransaction, ParseFailure> {
    let amount = find_amount(text).inspect_err(|e| tracing::debug!(%e, "message rejected"))?;
    let date = extract_date_or(text, now);
    let category = classify(text);

    tracing::debug!(%amount, %date, %category, "parsed payment message");

    Ok(ParsedTransaction {
        amount,
        date,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use paylog_core::Category;
    use rust_decimal_macros::dec;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_full_message() {
        let txn = parse_message_at("Paid Rs. 1,250.00 to Zomato on 29-Jul-25", now()).unwrap();
        assert_eq!(txn.amount, dec!(1250.00));
        assert_eq!(txn.category, Category::Food);
        assert_eq!(
            txn.date,
            NaiveDate::from_ymd_opt(2025, 7, 29)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_rupee_sign_without_date() {
        let txn = parse_message_at("₹499 spent via UPI", now()).unwrap();
        assert_eq!(txn.amount, dec!(499.0));
        assert_eq!(txn.category, Category::Transfer);
        assert_eq!(txn.date, now());
    }

    #[test]
    fn test_category_priority() {
        let txn = parse_message_at("INR 300 paid to Zomato using Paytm", now()).unwrap();
        assert_eq!(txn.category, Category::Food);
    }

    #[test]
    fn test_unmarked_text_fails() {
        for text in ["", "Paid 500 to Swiggy", "Your OTP is 123456", "$12.99 at Amazon"] {
            assert_eq!(parse_message_at(text, now()), Err(ParseFailure::NoAmount), "{text}");
        }
    }

    #[test]
    fn test_wall_clock_variant_parses() {
        let txn = parse_message("Rs 10 at Flipkart").unwrap();
        assert_eq!(txn.amount, dec!(10));
        assert_eq!(txn.category, Category::Shopping);
    }

    #[test]
    fn test_recording_overrides_message_date() {
        let txn = parse_message_at("Rs. 75 to Swiggy on 01-Jan-24", now()).unwrap();
        let expense = txn.into_new_expense(now());
        assert_eq!(expense.date, now());
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.amount, dec!(75));
    }
}
