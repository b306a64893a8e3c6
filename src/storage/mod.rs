//! Inventory storage
//!
//! SQLite persistence for stock, stock groups, invoices and warehouses, a
//! bounded connection pool for request handlers, and the stock search
//! queries.

mod database;
mod error;
mod pool;
mod repository;

pub use database::Database;
pub use error::StorageError;
pub use pool::ConnectionPool;
pub use repository::StockFilter;

#[cfg(test)]
pub(crate) mod fixtures;
