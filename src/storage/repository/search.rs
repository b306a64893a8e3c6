//! Stock search operations
//!
//! Products are matched on their description and aggregated per product,
//! category, price and warehouse. Inbound and outbound quantities are summed
//! over all invoice lines; products without movements still appear, with zero
//! totals and no location.

use rusqlite::params_from_iter;
use rusqlite::types::Value;

use super::{StockFilter, StorageError};
use crate::models::{SearchMode, SearchPage, StockQuery, StockRow};
use crate::storage::Database;

const STOCK_SOURCE: &str = "
    FROM stock s
    LEFT JOIN stock_group sg ON s.group_id = sg.group_id
    LEFT JOIN invoice_detail d ON s.stock_id = d.stock_id
    LEFT JOIN invoice i ON d.invoice_id = i.invoice_id
    LEFT JOIN warehouse w ON i.warehouse_id = w.warehouse_id";

const STOCK_GROUPING: &str =
    "GROUP BY s.description, sg.description, s.purchase_price, w.description";

impl Database {
    /// Count the result rows matching `filter`
    ///
    /// Counts grouped rows rather than products, so the total always agrees
    /// with what [`find_stock`](Self::find_stock) pages through.
    pub fn count_stock(&self, filter: &StockFilter) -> Result<u64, StorageError> {
        let (condition, values) = filter.to_sql();
        let sql = format!(
            "SELECT COUNT(*) FROM (SELECT 1 {} WHERE {} {})",
            STOCK_SOURCE, condition, STOCK_GROUPING
        );

        let count: i64 = self
            .connection()
            .query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Fetch one page of rows matching `filter`, ordered by product name
    ///
    /// # Arguments
    /// * `filter` - Description predicate
    /// * `limit` - Maximum number of rows
    /// * `offset` - Number of rows to skip
    pub fn find_stock(
        &self,
        filter: &StockFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<StockRow>, StorageError> {
        let (condition, mut values) = filter.to_sql();
        let limit_index = values.len() + 1;
        let offset_index = values.len() + 2;

        let sql = format!(
            "SELECT s.description,
                    sg.description,
                    s.purchase_price,
                    w.description,
                    COALESCE(SUM(d.qty_in), 0) AS total_in,
                    COALESCE(SUM(d.qty_out), 0) AS total_out,
                    COALESCE(SUM(d.qty_in), 0) - COALESCE(SUM(d.qty_out), 0) AS balance
             {source}
             WHERE {condition}
             {grouping}
             ORDER BY s.description, w.description, sg.description, s.purchase_price
             LIMIT ?{limit_index} OFFSET ?{offset_index}",
            source = STOCK_SOURCE,
            condition = condition,
            grouping = STOCK_GROUPING,
            limit_index = limit_index,
            offset_index = offset_index,
        );

        values.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        values.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));

        let mut stmt = self.connection().prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
            Ok(StockRow {
                product_name: row.get(0)?,
                category: row.get(1)?,
                price: row.get(2)?,
                location: row.get(3)?,
                total_in: row.get(4)?,
                total_out: row.get(5)?,
                balance: row.get(6)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
    }

    /// Search stock by product name
    ///
    /// Runs a case-insensitive substring match on the whole term first. Only
    /// when that matches nothing and the term has two or more distinct words
    /// does it retry with any of the words, reporting [`SearchMode::Broad`].
    pub fn search_stock(&self, query: &StockQuery) -> Result<SearchPage, StorageError> {
        let exact = StockFilter::Substring(query.term.clone());
        let total_results = self.count_stock(&exact)?;

        if total_results > 0 {
            let rows = self.find_stock(&exact, query.page_size, query.offset())?;
            return Ok(SearchPage {
                rows,
                total_results,
                mode: SearchMode::Exact,
            });
        }

        let words = query.words();
        if words.len() < 2 {
            return Ok(SearchPage::default());
        }

        tracing::debug!(term = %query.term, words = words.len(), "no exact match, broadening search");

        let broad = StockFilter::AnyWord(words);
        let total_results = self.count_stock(&broad)?;
        let rows = if total_results > 0 {
            self.find_stock(&broad, query.page_size, query.offset())?
        } else {
            Vec::new()
        };

        Ok(SearchPage {
            rows,
            total_results,
            mode: SearchMode::Broad,
        })
    }
}
