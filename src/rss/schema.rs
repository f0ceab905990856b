use crate::error::Result;
use crate::sqlite::Connection;

pub const FEED_TABLE: &str = "feed";
pub const ITEM_TABLE: &str = "item";
pub const GROUP_TABLE: &str = "feedgroup";

const CREATE_FEED: &str = "CREATE TABLE IF NOT EXISTS feed ( id INTEGER PRIMARY KEY, group_id INTEGER, url TEXT, title TEXT, desc TEXT, pubdate TEXT, stamp TEXT );";
const CREATE_ITEM: &str = "CREATE TABLE IF NOT EXISTS item ( id INTEGER PRIMARY KEY, feed_id INTEGER, url TEXT, title TEXT, desc TEXT, pubdate TEXT, body TEXT, stamp TEXT );";
const CREATE_FEEDGROUP: &str =
    "CREATE TABLE IF NOT EXISTS feedgroup ( id INTEGER PRIMARY KEY, title TEXT, stamp TEXT );";
const INSERT_MAIN_GROUP: &str =
    "INSERT INTO feedgroup (title, stamp) VALUES ( 'main', DATETIME('now') );";
const INDEX_FEED_URL: &str = "CREATE UNIQUE INDEX IF NOT EXISTS feedUrl ON feed(url);";

/// Title of the group seeded into a fresh database.
pub const DEFAULT_GROUP_TITLE: &str = "main";

/// Create missing tables, seed the default group and apply the `group_id` migration.
///
/// Runs in one transaction so a half-initialised schema is never left behind.
pub(crate) fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let mut tx = conn.transaction()?;

    if tx.table_exists(FEED_TABLE)? {
        // databases created before feed groups existed lack this column
        tx.add_column_if_missing(FEED_TABLE, "group_id", "INTEGER")?;
    } else {
        tx.execute_batch(CREATE_FEED)?;
        tracing::info!(table = FEED_TABLE, "created table");
    }

    if !tx.table_exists(ITEM_TABLE)? {
        tx.execute_batch(CREATE_ITEM)?;
        tracing::info!(table = ITEM_TABLE, "created table");
    }

    if !tx.table_exists(GROUP_TABLE)? {
        tx.execute_batch(CREATE_FEEDGROUP)?;
        tx.execute_batch(INSERT_MAIN_GROUP)?;
        tracing::info!(table = GROUP_TABLE, "created table with default group");
    }

    tx.execute_batch(INDEX_FEED_URL)?;
    tx.commit()
}
