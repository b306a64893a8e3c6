//! HTML views
//!
//! askama templates for the search page and the fragments `/search` returns,
//! plus the formatting helpers their view models use. Templates live in
//! `templates/` at the crate root.

mod format;
mod pagination;
mod search;

use askama::Template;
use axum::response::Html;

use crate::error::AppError;

pub use format::{format_currency, format_number};
pub use pagination::{search_href, NavButton, PageButton, PaginationView};
pub use search::{EmptySearchView, IndexView, SearchErrorView, SearchResultsView, StockRowView};

/// Render a template into an HTML response body
///
/// Failures are logged here and returned as [`AppError::Render`]; its
/// response shows the generic error fragment, or plain text if that fragment
/// cannot be rendered either.
pub fn render_template<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| {
        tracing::error!(template = std::any::type_name::<T>(), "Failed to render template: {}", e);
        AppError::from(e)
    })
}
