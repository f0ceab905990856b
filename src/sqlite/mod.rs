// SQLite module - the connection, statement and row layer everything else builds on
//
// - config: open options and shared-container path resolution
// - params: binding `RowValues` to statement placeholders
// - query: row marshalling
// - statement: statement lifecycle and the lazy row iterator
// - connection: open/close, query modes, transactions, schema introspection

pub mod config;
pub mod connection;
pub mod params;
pub mod query;
pub mod statement;

pub use config::{SHARED_CONTAINER_ROOT_ENV, SqliteOptions, SqliteOptionsBuilder};
pub use connection::{Connection, Transaction};
pub use params::{Params, bind_params};
pub use query::sqlite_extract_value;
pub use statement::{Rows, Statement, StatementState};
