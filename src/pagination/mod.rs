//! Pagination window calculation
//!
//! Turns a result count and a requested page into the compact list of page
//! tokens a paginator renders: the first and last page, a contiguous window
//! around the current page, and ellipsis markers for the pages left out.
//!
//! The calculation is pure and holds no state, so it can be called from any
//! request handler without coordination.

mod window;

pub use window::{page_window, PageRequest, PageToken, DEFAULT_VISIBLE_WINDOW};
