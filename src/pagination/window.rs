//! Page window computation

use std::fmt;

/// Number of page numbers shown around the current page when the caller does
/// not ask for a different window
pub const DEFAULT_VISIBLE_WINDOW: u64 = 7;

/// A single item in the rendered pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A concrete, 1-based page number
    Page(u64),
    /// Placeholder for one or more pages that are not shown
    Ellipsis,
}

impl PageToken {
    /// The page number, if this token is not an ellipsis
    pub fn page(&self) -> Option<u64> {
        match self {
            PageToken::Page(page) => Some(*page),
            PageToken::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageToken::Page(page) => write!(f, "{}", page),
            PageToken::Ellipsis => f.write_str("..."),
        }
    }
}

/// Inputs of the page window calculation
///
/// `current_page` is deliberately a signed, unchecked value: requests for
/// page 0, negative pages or pages past the end are all answered with a
/// sensible window instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub total_results: u64,
    pub current_page: i64,
    pub page_size: u64,
    pub visible_window: u64,
}

impl PageRequest {
    /// Create a request using the default visible window
    pub fn new(total_results: u64, current_page: i64, page_size: u64) -> Self {
        Self {
            total_results,
            current_page,
            page_size,
            visible_window: DEFAULT_VISIBLE_WINDOW,
        }
    }

    /// Override the number of pages shown around the current page
    pub fn with_visible_window(mut self, visible_window: u64) -> Self {
        self.visible_window = visible_window;
        self
    }

    /// Total number of pages, never less than 1
    ///
    /// A zero page size is treated as 1.
    pub fn total_pages(&self) -> u64 {
        let page_size = self.page_size.max(1);
        self.total_results.div_ceil(page_size).max(1)
    }

    /// Whether there is no page before the current one
    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// Whether there is no page after the current one
    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages_signed()
    }

    fn total_pages_signed(&self) -> i64 {
        i64::try_from(self.total_pages()).unwrap_or(i64::MAX)
    }
}

/// Compute the ordered page tokens for a paginator
///
/// The first page is always emitted, followed by an ellipsis when the window
/// starts after page 2, the window itself, an ellipsis when the window ends
/// before the second to last page, and finally the last page. Near either edge
/// the window is re-anchored so it keeps its full width instead of shrinking.
///
/// Returns an empty sequence when there are no results.
pub fn page_window(request: &PageRequest) -> Vec<PageToken> {
    if request.total_results == 0 {
        return Vec::new();
    }

    let total_pages = request.total_pages_signed();
    let window = i64::try_from(request.visible_window).unwrap_or(i64::MAX);
    let delta = window / 2;
    let current = request.current_page;

    let lower = current.saturating_sub(delta);
    let upper = current.saturating_add(delta);

    let mut start = lower.max(2);
    let mut end = upper.min(total_pages - 1);

    if lower < 2 {
        end = (total_pages - 1).min(window.saturating_sub(1));
    }
    if upper > total_pages - 1 {
        start = total_pages.saturating_sub(window).saturating_add(2).max(2);
    }

    let mut tokens = Vec::with_capacity(request.visible_window.min(64) as usize + 4);
    tokens.push(PageToken::Page(1));

    if start > 2 {
        tokens.push(PageToken::Ellipsis);
    }

    // start is at least 2 here, so the casts cannot wrap
    tokens.extend((start..=end).map(|page| PageToken::Page(page as u64)));

    if end < total_pages - 1 {
        tokens.push(PageToken::Ellipsis);
    }

    if total_pages > 1 {
        tokens.push(PageToken::Page(total_pages as u64));
    }

    tokens
}
