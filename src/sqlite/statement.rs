use std::fmt;

use crate::error::{FeedbaseError, Result};
use crate::query_utils::is_insert;
use crate::results::DbRow;
use crate::types::{RowValues, WriteOutcome};

use super::params::bind_params;
use super::query::RowShape;

/// Lifecycle of a [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementState {
    /// Compiled, nothing bound yet.
    Prepared,
    /// Parameters bound, not yet stepped.
    Bound,
    /// A row iterator is (or was) pulling from the statement.
    Stepping,
    /// Ran to completion or was abandoned; prepare a new statement to run it again.
    Exhausted,
}

/// A compiled statement borrowed from its [`super::Connection`].
///
/// The connection is borrowed mutably for as long as the statement lives, so
/// a connection never has two live statements. Dropping the statement (or
/// calling [`Statement::finalize`]) releases the compiled query.
pub struct Statement<'conn> {
    inner: rusqlite::Statement<'conn>,
    conn: &'conn rusqlite::Connection,
    sql: String,
    shape: RowShape,
    state: StatementState,
}

impl<'conn> Statement<'conn> {
    pub(crate) fn prepare(conn: &'conn rusqlite::Connection, sql: &str) -> Result<Self> {
        let inner = conn.prepare(sql).map_err(FeedbaseError::from_prepare)?;
        tracing::debug!(sql, params = inner.parameter_count(), "prepared statement");
        let shape = RowShape::of(&inner);
        Ok(Self {
            inner,
            conn,
            sql: sql.to_owned(),
            shape,
            state: StatementState::Prepared,
        })
    }

    /// Bind positional parameters.
    ///
    /// # Errors
    /// Returns `FeedbaseError::BindArityError` on a count mismatch and
    /// `FeedbaseError::StatementExhausted` once the statement has been stepped.
    pub fn bind(&mut self, params: &[RowValues]) -> Result<()> {
        if matches!(
            self.state,
            StatementState::Stepping | StatementState::Exhausted
        ) {
            return Err(FeedbaseError::StatementExhausted);
        }
        bind_params(&mut self.inner, params)?;
        self.state = StatementState::Bound;
        Ok(())
    }

    /// Lazily step through the result rows.
    ///
    /// Each call to `next` performs one engine step. The sequence is
    /// forward-only and single-pass: when it ends, or when the iterator is
    /// dropped early, the cursor is reset and the statement becomes
    /// [`StatementState::Exhausted`]. A second call yields a single
    /// `StatementExhausted` error.
    pub fn rows(&mut self) -> Rows<'_> {
        let pending = self.check_runnable().err();
        self.state = StatementState::Stepping;
        let inner = if pending.is_none() {
            Some(self.inner.raw_query())
        } else {
            None
        };
        Rows {
            inner,
            shape: self.shape.clone(),
            state: &mut self.state,
            pending,
        }
    }

    /// Run the statement to completion.
    ///
    /// `INSERT`/`REPLACE` statements that add a row report the new rowid;
    /// everything else, including an `INSERT OR IGNORE` that skipped its row,
    /// reports the number of changed rows.
    ///
    /// # Errors
    /// Returns `FeedbaseError::StepFailed` if the engine rejects the statement
    /// (constraint violations, statements that return rows, ...).
    pub fn execute(&mut self) -> Result<WriteOutcome> {
        self.check_runnable()?;
        self.state = StatementState::Stepping;
        let result = self.inner.raw_execute();
        self.state = StatementState::Exhausted;
        let rows = result.map_err(FeedbaseError::StepFailed)?;
        if rows > 0 && is_insert(&self.sql) {
            Ok(WriteOutcome::Inserted {
                row_id: self.conn.last_insert_rowid(),
            })
        } else {
            Ok(WriteOutcome::Changed { rows })
        }
    }

    /// Release the compiled statement now instead of at drop.
    ///
    /// # Errors
    /// Returns the engine error reported by `sqlite3_finalize`, if any.
    pub fn finalize(self) -> Result<()> {
        tracing::debug!(sql = %self.sql, "finalizing statement");
        self.inner.finalize()?;
        Ok(())
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn state(&self) -> StatementState {
        self.state
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.shape.names
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.inner.parameter_count()
    }

    fn check_runnable(&self) -> Result<()> {
        match self.state {
            StatementState::Stepping | StatementState::Exhausted => {
                Err(FeedbaseError::StatementExhausted)
            }
            StatementState::Prepared if self.inner.parameter_count() > 0 => {
                Err(FeedbaseError::BindArityError {
                    expected: self.inner.parameter_count(),
                    actual: 0,
                })
            }
            StatementState::Prepared | StatementState::Bound => Ok(()),
        }
    }
}

impl fmt::Debug for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("sql", &self.sql)
            .field("state", &self.state)
            .field("columns", &self.shape.names)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a mut Statement<'_> {
    type Item = Result<DbRow>;
    type IntoIter = Rows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// Forward-only iterator over a statement's result rows.
///
/// Fused: after the last row, or after yielding an error, it only returns `None`.
pub struct Rows<'stmt> {
    inner: Option<rusqlite::Rows<'stmt>>,
    shape: RowShape,
    state: &'stmt mut StatementState,
    pending: Option<FeedbaseError>,
}

impl Rows<'_> {
    fn finish(&mut self) {
        // dropping rusqlite's cursor resets the statement
        self.inner = None;
        *self.state = StatementState::Exhausted;
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<DbRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            self.finish();
            return Some(Err(err));
        }
        let cursor = self.inner.as_mut()?;
        let step = match cursor.next() {
            Ok(Some(row)) => Some(self.shape.build_row(row)),
            Ok(None) => None,
            Err(e) => Some(Err(FeedbaseError::StepFailed(e))),
        };
        match step {
            Some(Ok(row)) => Some(Ok(row)),
            Some(Err(err)) => {
                self.finish();
                Some(Err(err))
            }
            None => {
                self.finish();
                None
            }
        }
    }
}

impl Drop for Rows<'_> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            tracing::debug!("row iterator dropped before exhaustion; resetting statement");
        }
        self.finish();
    }
}
