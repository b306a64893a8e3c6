//! Stock search models

use serde::Serialize;

/// One line of the search result table
///
/// Quantities are aggregated over every invoice line of the product at the
/// given location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRow {
    /// Product description
    pub product_name: String,
    /// Stock group description, if the product belongs to one
    pub category: Option<String>,
    /// Purchase price
    pub price: Option<f64>,
    /// Warehouse description, absent for products without movements
    pub location: Option<String>,
    /// Sum of inbound quantities
    pub total_in: f64,
    /// Sum of outbound quantities
    pub total_out: f64,
    /// `total_in - total_out`
    pub balance: f64,
}

/// How the rows of a [`SearchPage`] were matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// The product description contains the whole search term
    #[default]
    Exact,
    /// No exact match existed; the description contains any word of the term
    Broad,
}

/// A single page of search results
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchPage {
    pub rows: Vec<StockRow>,
    /// Number of rows across all pages
    pub total_results: u64,
    pub mode: SearchMode,
}

/// A stock search request as seen by the storage layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuery {
    /// Trimmed, non-empty search term
    pub term: String,
    /// Requested 1-based page; values below 1 read the first page
    pub page: i64,
    pub page_size: u64,
}

impl StockQuery {
    pub fn new(term: impl Into<String>, page: i64, page_size: u64) -> Self {
        Self {
            term: term.into(),
            page,
            page_size,
        }
    }

    /// Number of rows skipped before this page
    pub fn offset(&self) -> u64 {
        let page = u64::try_from(self.page.max(1)).unwrap_or(1);
        (page - 1).saturating_mul(self.page_size)
    }

    /// Distinct lowercase words of the term, in order of first appearance
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for word in self.term.split_whitespace() {
            let word = word.to_lowercase();
            if !words.contains(&word) {
                words.push(word);
            }
        }
        words
    }
}
