//! Token extractors and the message parser that composes them.
//!
//! Each extractor scans the text independently and returns an optional typed
//! value; the message parser combines them first-match-wins.

pub mod amount;
pub mod date;
pub mod upi_message;

pub use amount::extract_amount;
pub use date::{extract_date, extract_date_or};
