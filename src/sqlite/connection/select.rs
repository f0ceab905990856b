use crate::error::Result;
use crate::results::DbRow;
use crate::sqlite::statement::Statement;
use crate::types::RowValues;

use super::Connection;

impl Connection {
    /// Prepare and bind `query`, handing back the statement for lazy iteration.
    ///
    /// ```rust,no_run
    /// # fn demo(conn: &mut feedbase::Connection) -> feedbase::Result<()> {
    /// for row in &mut conn.rows("SELECT id, title FROM feed WHERE group_id = ?", &[1.into()])? {
    ///     let row = row?;
    ///     println!("{:?}", row.get("title"));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns prepare or bind errors; step errors surface from the iterator.
    pub fn rows(&mut self, query: &str, params: &[RowValues]) -> Result<Statement<'_>> {
        let mut stmt = self.prepare(query)?;
        stmt.bind(params)?;
        Ok(stmt)
    }

    /// First column of the first row, or `RowValues::Null` when there is no row.
    ///
    /// # Errors
    /// Returns prepare, bind or step errors. The statement is finalized on every path.
    pub fn scalar(&mut self, query: &str, params: &[RowValues]) -> Result<RowValues> {
        let mut stmt = self.rows(query, params)?;
        let first = stmt.rows().next().transpose()?;
        stmt.finalize()?;
        Ok(first
            .and_then(|row| row.values.into_iter().next())
            .unwrap_or(RowValues::Null))
    }

    /// First row of the result, if any.
    ///
    /// # Errors
    /// Returns prepare, bind or step errors.
    pub fn query_row(&mut self, query: &str, params: &[RowValues]) -> Result<Option<DbRow>> {
        let mut stmt = self.rows(query, params)?;
        let first = stmt.rows().next().transpose()?;
        stmt.finalize()?;
        Ok(first)
    }

    /// Collect every result row.
    ///
    /// # Errors
    /// Returns prepare, bind or step errors.
    pub fn select_all(&mut self, query: &str, params: &[RowValues]) -> Result<Vec<DbRow>> {
        let mut stmt = self.rows(query, params)?;
        let rows = stmt.rows().collect::<Result<Vec<_>>>()?;
        stmt.finalize()?;
        Ok(rows)
    }
}
