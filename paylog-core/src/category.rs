//! Spending category taxonomy and the keyword classifier for payment messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed taxonomy assigned to a parsed payment message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Shopping,
    Transfer,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Shopping => "Shopping",
            Category::Transfer => "Transfer",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rules, evaluated top to bottom. First hit wins.
const RULES: &[(Category, &[&str])] = &[
    (Category::Food, &["zomato", "swiggy"]),
    (Category::Shopping, &["amazon", "flipkart"]),
    (Category::Transfer, &["paytm", "upi"]),
];

/// Classify free-form message text by case-insensitive keyword lookup.
///
/// Falls back to [`Category::Other`] when no rule matches.
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}
