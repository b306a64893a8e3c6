//! Search page and result fragment views

use askama::Template;

use super::format::{format_currency, format_number};
use super::pagination::PaginationView;
use crate::models::{SearchMode, SearchPage, StockRow};
use crate::pagination::PageRequest;

/// Placeholder for empty text cells
const MISSING: &str = "-";

/// Table row with every cell already formatted
#[derive(Debug, Clone)]
pub struct StockRowView {
    pub product_name: String,
    pub category: String,
    pub price: String,
    pub location: String,
    pub total_in: String,
    pub total_out: String,
    pub balance: String,
    /// Unformatted balance for client-side sorting
    pub balance_value: String,
    pub negative: bool,
}

impl From<&StockRow> for StockRowView {
    fn from(row: &StockRow) -> Self {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(MISSING)
                .to_string()
        };

        Self {
            product_name: if row.product_name.trim().is_empty() {
                MISSING.to_string()
            } else {
                row.product_name.clone()
            },
            category: text(&row.category),
            price: format_currency(row.price),
            location: text(&row.location),
            total_in: format_number(row.total_in),
            total_out: format_number(row.total_out),
            balance: format_number(row.balance),
            balance_value: row.balance.to_string(),
            negative: row.balance < 0.0,
        }
    }
}

/// Full page with the search form
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {
    pub default_limit: u64,
}

/// Result fragment returned by `/search`
#[derive(Template)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsView {
    pub term: String,
    pub rows: Vec<StockRowView>,
    pub pagination: PaginationView,
    pub show_pagination: bool,
    /// Rows come from the any-word fallback
    pub broad: bool,
}

impl SearchResultsView {
    pub fn new(term: &str, page: &SearchPage, request: &PageRequest) -> Self {
        let pagination = PaginationView::new(request, term, page.rows.len());
        Self {
            term: term.to_string(),
            rows: page.rows.iter().map(StockRowView::from).collect(),
            show_pagination: pagination.has_multiple_pages(),
            pagination,
            broad: page.mode == SearchMode::Broad && page.total_results > 0,
        }
    }
}

/// Fragment for a search without a term
#[derive(Template)]
#[template(path = "partials/empty_search.html")]
pub struct EmptySearchView {
    pub message: String,
}

impl EmptySearchView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Generic failure fragment; never carries internal details
#[derive(Template)]
#[template(path = "partials/search_error.html")]
pub struct SearchErrorView {
    pub message: String,
}

impl SearchErrorView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
