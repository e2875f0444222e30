//! paylog-ingest: heuristic extraction of payment notifications into transactions.

pub mod types;
pub mod parsers;

pub use types::{ParsedTransaction, ParseFailure};
pub use parsers::upi_message::{parse_message, parse_message_at};
