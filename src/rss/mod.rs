//! Feed reader storage: feeds, their items and feed groups.
//!
//! [`RssDb`] opens (or creates) the database, brings the schema up to date
//! and exposes typed accessors built on [`CrudClient`].

mod feeds;
mod groups;
mod items;
mod model;
mod schema;

pub use model::{Feed, FeedGroup, FeedWrite, Item, NewFeed, NewItem};
pub use schema::{DEFAULT_GROUP_TITLE, FEED_TABLE, GROUP_TABLE, ITEM_TABLE};

use std::path::Path;

use chrono::Duration;

use crate::crud::{CrudClient, TableCrud};
use crate::error::Result;
use crate::sqlite::{Connection, SqliteOptions};

/// Items older than this are removed by [`RssDb::delete_old_items`] unless overridden.
pub const DEFAULT_ITEM_RETENTION_HOURS: i64 = 24;

/// Typed access to the feed database.
#[derive(Debug)]
pub struct RssDb {
    crud: CrudClient,
    item_retention: Duration,
}

impl RssDb {
    /// Open the database file at `path`, creating tables as needed.
    ///
    /// # Errors
    /// Returns `FeedbaseError::OpenFailed` if the file cannot be opened, or the
    /// engine error if the schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open with explicit options, e.g. an app-group container.
    ///
    /// # Errors
    /// Same as [`RssDb::open`].
    pub fn open_with(opts: &SqliteOptions) -> Result<Self> {
        Self::from_connection(Connection::open_with(opts)?)
    }

    /// Take over an open connection and bring its schema up to date.
    ///
    /// # Errors
    /// Returns the engine error if the schema cannot be created or migrated.
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        schema::ensure_schema(&mut conn)?;
        Ok(Self {
            crud: CrudClient::with_table(conn, FEED_TABLE)?,
            item_retention: Duration::hours(DEFAULT_ITEM_RETENTION_HOURS),
        })
    }

    /// Override how long items are kept before [`RssDb::delete_old_items`] removes them.
    #[must_use]
    pub fn with_item_retention(mut self, retention: Duration) -> Self {
        self.item_retention = retention;
        self
    }

    #[must_use]
    pub fn item_retention(&self) -> Duration {
        self.item_retention
    }

    /// The underlying CRUD client, for queries the typed API does not cover.
    pub fn crud(&mut self) -> &mut CrudClient {
        &mut self.crud
    }

    pub fn connection(&mut self) -> &mut Connection {
        self.crud.connection()
    }

    /// Close the database.
    ///
    /// # Errors
    /// Returns `FeedbaseError::ConnectionError` if the engine refuses to close.
    pub fn close(self) -> Result<()> {
        let mut conn = self.crud.into_connection();
        conn.close()
    }

    fn table<'a>(&'a mut self, name: &'a str) -> Result<TableCrud<'a>> {
        self.crud.table(name)
    }
}
