use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::OpenFlags;

use crate::error::{FeedbaseError, Result};
use crate::sqlite::config::SqliteOptions;
use crate::sqlite::statement::Statement;

/// A single synchronous connection to an on-disk `SQLite` database.
///
/// Statements borrow the connection mutably, so at most one statement is
/// alive per connection. The handle is released by [`Connection::close`] or,
/// failing that, when the connection is dropped.
pub struct Connection {
    pub(crate) conn: Option<rusqlite::Connection>,
    path: PathBuf,
    app_group: Option<String>,
    table_name: Option<String>,
}

impl Connection {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// # Errors
    /// Returns `FeedbaseError::OpenFailed` if the file cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(&SqliteOptions::new(path.as_ref().to_string_lossy()))
    }

    /// Open the database at `path` with `table_name` as the default CRUD table.
    ///
    /// # Errors
    /// Returns `FeedbaseError::OpenFailed` if the file cannot be opened or created.
    pub fn open_with_table(path: impl AsRef<Path>, table_name: &str) -> Result<Self> {
        SqliteOptions::builder(path.as_ref().to_string_lossy())
            .table_name(table_name)
            .open()
    }

    /// Open a connection described by `opts`, resolving shared-container paths.
    ///
    /// # Errors
    /// Returns `FeedbaseError::OpenFailed` if the container cannot be resolved,
    /// the file cannot be opened, or the initial pragmas fail.
    pub fn open_with(opts: &SqliteOptions) -> Result<Self> {
        let path = opts.resolve_path()?;
        let open_failed = |e: rusqlite::Error| FeedbaseError::OpenFailed {
            path: path.clone(),
            reason: e.to_string(),
        };

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = rusqlite::Connection::open_with_flags(&path, flags).map_err(open_failed)?;
        conn.busy_timeout(Duration::from_millis(opts.busy_timeout_ms))
            .map_err(open_failed)?;
        if opts.wal {
            // in-memory databases answer "memory"; both are fine
            let mode: String = conn
                .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
                .map_err(open_failed)?;
            tracing::debug!(path = %path.display(), journal_mode = %mode, "journal mode set");
        }

        tracing::debug!(
            path = %path.display(),
            app_group = opts.app_group.as_deref(),
            "opened sqlite connection"
        );
        Ok(Self {
            conn: Some(conn),
            path,
            app_group: opts.app_group.clone(),
            table_name: opts.table_name.clone(),
        })
    }

    /// Release the database handle.
    ///
    /// Closing an already-closed connection is a no-op. An open transaction is
    /// discarded by the engine.
    ///
    /// # Errors
    /// Returns `FeedbaseError::ConnectionError` if `SQLite` refuses to close; the
    /// connection then stays open.
    pub fn close(&mut self) -> Result<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        if !conn.is_autocommit() {
            tracing::warn!(path = %self.path.display(), "closing with an open transaction; it is discarded");
        }
        match conn.close() {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "closed sqlite connection");
                Ok(())
            }
            Err((conn, e)) => {
                self.conn = Some(conn);
                Err(FeedbaseError::ConnectionError(format!(
                    "failed to close {}: {e}",
                    self.path.display()
                )))
            }
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Resolved path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default table configured at open time, if any.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    #[must_use]
    pub fn app_group(&self) -> Option<&str> {
        self.app_group.as_deref()
    }

    /// Compile `sql` into a [`Statement`].
    ///
    /// The statement borrows this connection until it is dropped or
    /// finalized; preparing another one first requires letting go of it.
    ///
    /// # Errors
    /// Returns `FeedbaseError::SqlSyntaxError` for malformed SQL and
    /// `FeedbaseError::PrepareFailed` for other compile failures (unknown
    /// table, ...).
    pub fn prepare(&mut self, sql: &str) -> Result<Statement<'_>> {
        Statement::prepare(self.handle()?, sql)
    }

    pub(crate) fn handle(&self) -> Result<&rusqlite::Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| FeedbaseError::ConnectionError("connection is closed".into()))
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("path", &self.path)
            .field("app_group", &self.app_group)
            .field("table_name", &self.table_name)
            .field("open", &self.conn.is_some())
            .finish()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if !conn.is_autocommit() {
                tracing::warn!(path = %self.path.display(), "connection dropped with an open transaction; it is discarded");
            }
            tracing::debug!(path = %self.path.display(), "releasing sqlite connection on drop");
            drop(conn);
        }
    }
}
