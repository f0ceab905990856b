use crate::error::Result;
use crate::query_utils::quote_identifier;
use crate::results::DbRow;
use crate::types::RowValues;

use super::{ID_COLUMN, Order, TableCrud};

impl TableCrud<'_> {
    /// Fetch row `row_id`, or `None` if it does not exist.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn get(&mut self, row_id: i64) -> Result<Option<DbRow>> {
        self.first_where(&[(ID_COLUMN, RowValues::Int(row_id))])
    }

    /// Number of rows in the table.
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn count(&mut self) -> Result<i64> {
        self.count_where(&[])
    }

    /// Number of rows matching `filters`.
    ///
    /// # Errors
    /// Returns `InvalidIdentifier`/`UnknownColumn` for bad column names, or the engine error.
    pub fn count_where(&mut self, filters: &[(&str, RowValues)]) -> Result<i64> {
        let (clause, params) = self.filter_clause(filters)?;
        let sql = format!("SELECT COUNT(*) FROM {}{clause}", self.quoted_table()?);
        Ok(self.conn.scalar(&sql, &params)?.as_int().unwrap_or(0))
    }

    /// First row matching `filters` in rowid order.
    ///
    /// # Errors
    /// Returns `InvalidIdentifier`/`UnknownColumn` for bad column names, or the engine error.
    pub fn first_where(&mut self, filters: &[(&str, RowValues)]) -> Result<Option<DbRow>> {
        let (clause, params) = self.filter_clause(filters)?;
        let sql = format!(
            "SELECT * FROM {}{clause} ORDER BY {} LIMIT 1",
            self.quoted_table()?,
            quote_identifier(ID_COLUMN)?
        );
        self.conn.query_row(&sql, &params)
    }

    /// Ids of rows matching `filters`, sorted by `order` (rowid order when `None`).
    ///
    /// # Errors
    /// Returns `InvalidIdentifier`/`UnknownColumn` for bad column names, or the engine error.
    pub fn ids_where(
        &mut self,
        filters: &[(&str, RowValues)],
        order: Option<Order<'_>>,
    ) -> Result<Vec<i64>> {
        let (clause, params) = self.filter_clause(filters)?;
        let id = quote_identifier(ID_COLUMN)?;
        let order_by = match order {
            Some(order) => {
                let (column, direction) = match order {
                    Order::Asc(column) => (column, "ASC"),
                    Order::Desc(column) => (column, "DESC"),
                };
                self.check_column(column)?;
                format!("{} {direction}, {id}", quote_identifier(column)?)
            }
            None => id.clone(),
        };
        let sql = format!(
            "SELECT {id} FROM {}{clause} ORDER BY {order_by}",
            self.quoted_table()?
        );

        let mut ids = Vec::new();
        let mut stmt = self.conn.rows(&sql, &params)?;
        for row in &mut stmt {
            if let Some(id) = row?.get_by_index(0).and_then(RowValues::as_int) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
