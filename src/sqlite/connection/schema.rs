use crate::error::Result;
use crate::query_utils::quote_identifier;
use crate::types::RowValues;

use super::Connection;

impl Connection {
    /// Whether a table named `name` exists. Absence is `Ok(false)`.
    ///
    /// # Errors
    /// Returns engine errors only.
    pub fn table_exists(&mut self, name: &str) -> Result<bool> {
        let count = self.scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            &[RowValues::from(name)],
        )?;
        Ok(count.as_int().unwrap_or(0) > 0)
    }

    /// Whether `table` has a column named `column`. A missing table or
    /// column is `Ok(false)`.
    ///
    /// # Errors
    /// Returns engine errors only.
    pub fn column_exists(&mut self, table: &str, column: &str) -> Result<bool> {
        let count = self.scalar(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            &[RowValues::from(table), RowValues::from(column)],
        )?;
        Ok(count.as_int().unwrap_or(0) > 0)
    }

    /// Add `column` to `table` unless it is already there; returns whether it was added.
    ///
    /// `declaration` is the column type clause, e.g. `"INTEGER"`.
    ///
    /// # Errors
    /// Returns `FeedbaseError::InvalidIdentifier` for bad names, or the engine error.
    pub fn add_column_if_missing(
        &mut self,
        table: &str,
        column: &str,
        declaration: &str,
    ) -> Result<bool> {
        if self.column_exists(table, column)? {
            return Ok(false);
        }
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} {declaration}",
            quote_identifier(table)?,
            quote_identifier(column)?
        );
        self.execute_batch(&sql)?;
        tracing::info!(table, column, "added missing column");
        Ok(true)
    }
}
