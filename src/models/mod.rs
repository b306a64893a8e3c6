//! Data models shared by the storage and presentation layers

mod stock;

pub use stock::{SearchMode, SearchPage, StockQuery, StockRow};
