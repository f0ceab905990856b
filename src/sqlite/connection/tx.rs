use std::ops::{Deref, DerefMut};

use crate::error::{FeedbaseError, Result};

use super::Connection;

impl Connection {
    /// Whether the engine currently has an open transaction on this connection.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.handle().is_ok_and(|conn| !conn.is_autocommit())
    }

    /// Begin a transaction.
    ///
    /// # Errors
    /// Returns `FeedbaseError::TransactionStateError` if a transaction is
    /// already open (nesting is not supported), or the engine error.
    pub fn begin(&mut self) -> Result<()> {
        self.run_tx_command("BEGIN", false)
    }

    /// Commit the open transaction.
    ///
    /// # Errors
    /// Returns `FeedbaseError::TransactionStateError` if no transaction is
    /// open. If `COMMIT` itself fails the transaction stays open.
    pub fn commit(&mut self) -> Result<()> {
        self.run_tx_command("COMMIT", true)
    }

    /// Roll back the open transaction.
    ///
    /// Failed statements inside a transaction never roll back on their own;
    /// callers decide between this and [`Connection::commit`].
    ///
    /// # Errors
    /// Returns `FeedbaseError::TransactionStateError` if no transaction is open.
    pub fn rollback(&mut self) -> Result<()> {
        self.run_tx_command("ROLLBACK", true)
    }

    /// Begin a transaction scoped to the returned guard.
    ///
    /// The guard derefs to the connection. Dropping it without
    /// [`Transaction::commit`] rolls back.
    ///
    /// # Errors
    /// Same as [`Connection::begin`].
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.begin()?;
        Ok(Transaction {
            conn: self,
            finished: false,
        })
    }

    fn run_tx_command(&mut self, command: &'static str, needs_open: bool) -> Result<()> {
        let conn = self.handle()?;
        let open = !conn.is_autocommit();
        if open != needs_open {
            let msg = if open {
                "transaction already in progress"
            } else {
                "no transaction in progress"
            };
            return Err(FeedbaseError::TransactionStateError(format!("{command}: {msg}")));
        }
        conn.execute_batch(command)
            .map_err(FeedbaseError::StepFailed)?;
        tracing::debug!(path = %self.path().display(), command, "transaction control");
        Ok(())
    }
}

/// Scoped transaction; rolls back on drop unless committed.
pub struct Transaction<'conn> {
    conn: &'conn mut Connection,
    finished: bool,
}

impl Transaction<'_> {
    /// Commit and end the scope.
    ///
    /// # Errors
    /// Returns the commit error; the guard then rolls back when dropped.
    pub fn commit(mut self) -> Result<()> {
        self.conn.commit()?;
        self.finished = true;
        Ok(())
    }

    /// Roll back and end the scope.
    ///
    /// # Errors
    /// Returns the rollback error.
    pub fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.conn.rollback()
    }
}

impl Deref for Transaction<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Connection {
        self.conn
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished && self.conn.in_transaction() {
            tracing::warn!(path = %self.conn.path().display(), "transaction dropped without commit; rolling back");
            if let Err(e) = self.conn.rollback() {
                tracing::warn!(error = %e, "rollback on drop failed");
            }
        }
    }
}
