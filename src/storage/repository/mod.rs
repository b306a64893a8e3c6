//! Repository layer for inventory queries
//!
//! Provides the stock search built on top of [`Database`](super::Database).

mod search;

use rusqlite::types::Value;

use super::database::UNICODE_LOWER;

pub use super::error::StorageError;

/// Predicate applied to the product description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockFilter {
    /// Description contains the whole text, ignoring case
    Substring(String),
    /// Description contains at least one of the words, ignoring case
    AnyWord(Vec<String>),
}

impl StockFilter {
    /// SQL condition plus its bound values, numbered from `?1`
    pub(super) fn to_sql(&self) -> (String, Vec<Value>) {
        match self {
            StockFilter::Substring(text) => (
                like_condition(1),
                vec![Value::Text(like_pattern(text))],
            ),
            StockFilter::AnyWord(words) if words.is_empty() => ("0".to_string(), Vec::new()),
            StockFilter::AnyWord(words) => {
                let conditions: Vec<String> = (1..=words.len()).map(like_condition).collect();
                let values = words.iter().map(|w| Value::Text(like_pattern(w))).collect();
                (format!("({})", conditions.join(" OR ")), values)
            }
        }
    }
}

fn like_condition(index: usize) -> String {
    format!(
        "{lower}(s.description) LIKE {lower}(?{index}) ESCAPE '\\'",
        lower = UNICODE_LOWER,
        index = index
    )
}

/// Wrap `text` in `%` after escaping LIKE wildcards, so user input only ever
/// matches literally
pub(super) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
