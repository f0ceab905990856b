//! Convenient imports for common functionality.
//!
//! `use feedbase::prelude::*;` brings in the connection, row and CRUD types.

pub use crate::crud::{CrudClient, Order, Record, TableCrud};
pub use crate::error::{FeedbaseError, Result};
pub use crate::results::DbRow;
pub use crate::rss::{Feed, FeedGroup, FeedWrite, Item, NewFeed, NewItem, RssDb};
pub use crate::sqlite::{Connection, SqliteOptions, Statement, Transaction};
pub use crate::types::{RowValues, WriteOutcome};
