//! Currency-marked amount extraction.
//!
//! Recognized markers (case-insensitive): `Rs`, `Rs.`, `INR`, `₹`, followed by
//! optional whitespace and a number such as `1,250.00`.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::types::ParseFailure;

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Rs\.?|INR|₹)\s*(?P<amount>[0-9,]+(?:\.[0-9]+)?)")
        .expect("amount pattern is valid")
});

/// First currency-marked amount in `text`, if any.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    find_amount(text).ok()
}

/// Like [`extract_amount`], but says why nothing usable was found.
///
/// Only the first marker+number pair is considered.
pub fn find_amount(text: &str) -> Result<Decimal, ParseFailure> {
    let caps = AMOUNT_RE.captures(text).ok_or(ParseFailure::NoAmount)?;
    let raw = &caps["amount"];

    let amount = Decimal::from_str(&raw.replace(',', "")).map_err(|_| {
        ParseFailure::InvalidAmount {
            raw: raw.to_string(),
        }
    })?;

    if amount <= Decimal::ZERO {
        return Err(ParseFailure::NonPositiveAmount { amount });
    }

    Ok(amount)
}
