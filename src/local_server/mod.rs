//! HTTP server module
//!
//! Serves the search page and the `/search` fragment endpoint. The listener
//! address, page sizes and pagination window come from [`ServerConfig`].

mod config;
mod handlers;
mod server;

pub use config::{ServerConfig, CONFIG_FILENAME, DEFAULT_PORT, DEFAULT_RESULTS_PER_PAGE};
pub use handlers::{AppState, SearchParams, EMPTY_TERM_MESSAGE, INVALID_QUERY_MESSAGE};
pub use server::{build_router, LocalServer, ServerHandle};
