//! Synchronous `SQLite` access layer with a small CRUD facade and typed
//! storage for a feed reader.
//!
//! The layers build on each other:
//!
//! - [`Connection`] owns one database handle; statements borrow it mutably so
//!   only one is ever live.
//! - [`Statement`] binds [`RowValues`] positionally and yields [`DbRow`]s lazily.
//! - [`CrudClient`] templates insert/update/delete/get from field names.
//! - [`rss::RssDb`] stores feeds, items and feed groups.

mod error;
mod query_utils;
mod results;
mod types;

pub mod crud;
pub mod prelude;
pub mod rss;
pub mod sqlite;

pub use crud::{CrudClient, Order, Record, TableCrud};
pub use error::{FeedbaseError, Result};
pub use query_utils::{quote_identifier, validate_identifier};
pub use results::DbRow;
pub use rss::RssDb;
pub use sqlite::{
    Connection, Rows, SqliteOptions, SqliteOptionsBuilder, Statement, StatementState, Transaction,
};
pub use types::{RowValues, SQL_TIMESTAMP_FORMAT, WriteOutcome};

/// Crate version, as recorded in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
