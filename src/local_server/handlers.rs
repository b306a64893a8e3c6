//! HTTP route handlers
//!
//! Implements `/`, `/search` and `/api/health`.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::config::ServerConfig;
use crate::error::AppError;
use crate::models::StockQuery;
use crate::pagination::PageRequest;
use crate::storage::ConnectionPool;
use crate::views::{render_template, IndexView, SearchResultsView};

/// Message shown when the search box is submitted empty
pub const EMPTY_TERM_MESSAGE: &str = "Please enter a search term";

/// Message shown when the query string cannot be read at all
pub const INVALID_QUERY_MESSAGE: &str = "Invalid search request, please search again";

/// Shared state
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub config: ServerConfig,
}

/// Query string of `/search`
///
/// Every field is kept as raw text so malformed numbers fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    /// Trimmed search term, empty if missing
    pub fn term(&self) -> &str {
        self.product_name.as_deref().map(str::trim).unwrap_or("")
    }

    /// Requested page, 1 if missing or not a number
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }

    /// Requested page size, if it is a number
    pub fn limit(&self) -> Option<u64> {
        self.limit.as_deref().and_then(|l| l.trim().parse().ok())
    }
}

/// GET /
///
/// Search page with an empty result table
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render_template(&IndexView {
        default_limit: state.config.results_per_page,
    })
}

/// GET /search
///
/// Returns the result fragment for one page of a product search
pub async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    // Answer with a fragment rather than axum's plain-text rejection
    let Query(params) = query.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "malformed search query");
        AppError::validation(INVALID_QUERY_MESSAGE)
    })?;

    let term = params.term();
    if term.is_empty() {
        return Err(AppError::validation(EMPTY_TERM_MESSAGE));
    }

    let page = params.page();
    let page_size = state.config.page_size(params.limit());
    tracing::info!(term, page, page_size, "search request");

    let query = StockQuery::new(term, page, page_size);
    let result = state.pool.run(move |db| db.search_stock(&query)).await?;

    tracing::info!(
        rows = result.rows.len(),
        total = result.total_results,
        mode = ?result.mode,
        "found {} results on page {}",
        result.rows.len(),
        page
    );

    let request = PageRequest::new(result.total_results, page, page_size)
        .with_visible_window(state.config.visible_pages);

    render_template(&SearchResultsView::new(term, &result, &request))
}

/// GET /api/health
///
/// Health check endpoint, used to detect whether the service is running
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "stock-search",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[cfg(test)]
mod handler_tests {
    use super::*;

    fn params(term: Option<&str>, page: Option<&str>, limit: Option<&str>) -> SearchParams {
        SearchParams {
            product_name: term.map(str::to_string),
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_term_is_trimmed() {
        assert_eq!(params(Some("  bolt "), None, None).term(), "bolt");
        assert_eq!(params(Some("   "), None, None).term(), "");
        assert_eq!(params(None, None, None).term(), "");
    }

    #[test]
    fn test_page_defaults_to_first() {
        assert_eq!(params(None, None, None).page(), 1);
        assert_eq!(params(None, Some("abc"), None).page(), 1);
        assert_eq!(params(None, Some(" 4 "), None).page(), 4);
        assert_eq!(params(None, Some("-2"), None).page(), -2);
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(params(None, None, None).limit(), None);
        assert_eq!(params(None, None, Some("x")).limit(), None);
        assert_eq!(params(None, None, Some("-5")).limit(), None);
        assert_eq!(params(None, None, Some("25")).limit(), Some(25));
    }
}
