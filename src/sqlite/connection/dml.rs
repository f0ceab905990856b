use crate::error::{FeedbaseError, Result};
use crate::types::{RowValues, WriteOutcome};

use super::Connection;

impl Connection {
    /// Run a write statement to completion.
    ///
    /// Returns [`WriteOutcome::Inserted`] with the new rowid when an `INSERT` /
    /// `REPLACE` adds a row, otherwise [`WriteOutcome::Changed`] with the
    /// affected-row count.
    ///
    /// # Errors
    /// Returns prepare/bind errors, or `FeedbaseError::StepFailed` if execution
    /// fails. The statement is finalized on every path.
    pub fn exec_write(&mut self, query: &str, params: &[RowValues]) -> Result<WriteOutcome> {
        let mut stmt = self.prepare(query)?;
        stmt.bind(params)?;
        let outcome = stmt.execute()?;
        stmt.finalize()?;
        Ok(outcome)
    }

    /// Execute parameterless SQL that may contain several statements (DDL, pragmas).
    ///
    /// # Errors
    /// Returns `FeedbaseError::StepFailed` if any statement fails.
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.handle()?
            .execute_batch(sql)
            .map_err(FeedbaseError::StepFailed)
    }

    /// Rowid of the most recent successful `INSERT` on this connection.
    ///
    /// # Errors
    /// Returns `FeedbaseError::ConnectionError` if the connection is closed.
    pub fn last_insert_id(&self) -> Result<i64> {
        Ok(self.handle()?.last_insert_rowid())
    }
}
