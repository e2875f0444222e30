//! `DD-Mon-YY` / `DD-Mon-YYYY` date extraction, e.g. `29-Jul-25`.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<day>\d{1,2})-(?P<mon>[A-Za-z]{3})-(?P<year>\d{2,4})")
        .expect("date pattern is valid")
});

/// First date token in `text`, if it forms a real calendar date.
///
/// Two-digit years are read as 20YY.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(text)?;

    let year = match caps["year"].len() {
        2 => format!("20{}", &caps["year"]),
        4 => caps["year"].to_string(),
        _ => return None,
    };

    NaiveDate::parse_from_str(&format!("{}-{}-{year}", &caps["day"], &caps["mon"]), "%d-%b-%Y").ok()
}

/// Date token from `text` at midnight, or `now` when absent or invalid.
pub fn extract_date_or(text: &str, now: NaiveDateTime) -> NaiveDateTime {
    match extract_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(dt) => dt,
        None => {
            tracing::debug!("no usable date token, falling back to {now}");
            now
        }
    }
}
