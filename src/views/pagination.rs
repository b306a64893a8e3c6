//! Pagination control view model
//!
//! Turns the page tokens of [`page_window`] into buttons that re-run the
//! current search on another page, keeping term and page size.

use crate::pagination::{page_window, PageRequest, PageToken};

/// A numbered page button or an ellipsis placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub label: String,
    /// Empty for ellipsis placeholders
    pub href: String,
    /// Marks the page being displayed
    pub current: bool,
    pub ellipsis: bool,
}

/// First, previous, next or last button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub symbol: &'static str,
    pub aria_label: &'static str,
    pub href: String,
    pub disabled: bool,
}

/// Everything the pagination partial renders
#[derive(Debug, Clone)]
pub struct PaginationView {
    /// First and previous
    pub leading: Vec<NavButton>,
    pub buttons: Vec<PageButton>,
    /// Next and last
    pub trailing: Vec<NavButton>,
    pub total_pages: u64,
    /// 1-based index of the first row shown, 0 when the page is empty
    pub showing_from: u64,
    /// 1-based index of the last row shown, 0 when the page is empty
    pub showing_to: u64,
    pub total_results: u64,
}

impl PaginationView {
    /// Build the controls for `request`
    ///
    /// # Arguments
    /// * `request` - Result count, current page, page size and window
    /// * `term` - Search term the links repeat
    /// * `rows_on_page` - Number of rows actually returned for this page
    pub fn new(request: &PageRequest, term: &str, rows_on_page: usize) -> Self {
        let total_pages = request.total_pages();
        let last = i64::try_from(total_pages).unwrap_or(i64::MAX);
        let current = request.current_page;
        let limit = request.page_size;

        let buttons = page_window(request)
            .into_iter()
            .map(|token| match token {
                PageToken::Page(page) => PageButton {
                    label: page.to_string(),
                    href: search_href(term, page as i64, limit),
                    current: page as i64 == current,
                    ellipsis: false,
                },
                PageToken::Ellipsis => PageButton {
                    label: "...".to_string(),
                    href: String::new(),
                    current: false,
                    ellipsis: true,
                },
            })
            .collect();

        let at_start = request.is_first_page();
        let at_end = request.is_last_page();
        let previous = current.saturating_sub(1).clamp(1, last);
        let next = current.saturating_add(1).clamp(1, last);

        let leading = vec![
            NavButton {
                symbol: "«",
                aria_label: "First page",
                href: search_href(term, 1, limit),
                disabled: at_start,
            },
            NavButton {
                symbol: "‹",
                aria_label: "Previous page",
                href: search_href(term, previous, limit),
                disabled: at_start,
            },
        ];
        let trailing = vec![
            NavButton {
                symbol: "›",
                aria_label: "Next page",
                href: search_href(term, next, limit),
                disabled: at_end,
            },
            NavButton {
                symbol: "»",
                aria_label: "Last page",
                href: search_href(term, last, limit),
                disabled: at_end,
            },
        ];

        let (showing_from, showing_to) = if rows_on_page == 0 {
            (0, 0)
        } else {
            let page = u64::try_from(current.max(1)).unwrap_or(1);
            let offset = (page - 1).saturating_mul(limit);
            let to = offset
                .saturating_add(rows_on_page as u64)
                .min(request.total_results);
            (offset + 1, to)
        };

        Self {
            leading,
            buttons,
            trailing,
            total_pages,
            showing_from,
            showing_to,
            total_results: request.total_results,
        }
    }

    /// Whether the controls are worth rendering at all
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}

/// Link that reruns a search for `page`
pub fn search_href(term: &str, page: i64, limit: u64) -> String {
    format!(
        "/search?productName={}&page={}&limit={}",
        urlencoding::encode(term),
        page,
        limit
    )
}
