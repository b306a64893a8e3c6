// Stock Search Library
// Product lookup over the inventory database with paginated HTML results

pub mod error;
pub mod local_server;
pub mod models;
pub mod pagination;
pub mod storage;
pub mod views;

pub use error::AppError;
pub use local_server::{LocalServer, ServerConfig, ServerHandle};
pub use pagination::{page_window, PageRequest, PageToken};
pub use storage::{ConnectionPool, Database};
