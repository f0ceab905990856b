use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FeedbaseError, Result};

use super::connection::Connection;

/// Environment variable consulted when an app group is requested without an
/// explicit container root.
pub const SHARED_CONTAINER_ROOT_ENV: &str = "FEEDBASE_SHARED_CONTAINER_ROOT";

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_wal() -> bool {
    true
}

/// Options for opening a `SQLite` [`Connection`].
///
/// Deserializable so callers can keep them in a JSON config file:
/// ```rust
/// use feedbase::SqliteOptions;
///
/// let opts = SqliteOptions::from_json_str(r#"{ "db_path": "feeds.db", "table_name": "feed" }"#)
///     .unwrap();
/// assert_eq!(opts.table_name.as_deref(), Some("feed"));
/// assert!(opts.wal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteOptions {
    /// File name (when `app_group` is set) or path of the database file.
    pub db_path: String,
    /// Shared container group that hosts the file, if any.
    #[serde(default)]
    pub app_group: Option<String>,
    /// Directory holding one sub-directory per app group.
    #[serde(default)]
    pub container_root: Option<PathBuf>,
    /// Default table used by the CRUD facade.
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Switch the database to WAL journaling on open.
    #[serde(default = "default_wal")]
    pub wal: bool,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            app_group: None,
            container_root: None,
            table_name: None,
            busy_timeout_ms: default_busy_timeout_ms(),
            wal: default_wal(),
        }
    }

    #[must_use]
    pub fn builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    /// Returns `FeedbaseError::ConfigError` if the document is not valid options JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| FeedbaseError::ConfigError(format!("invalid sqlite options: {e}")))
    }

    /// Resolve the on-disk location of the database file.
    ///
    /// Without an app group, `db_path` is used as given. With one, the file
    /// lives in `<container_root>/<app_group>/<db_path>`; the container root
    /// falls back to [`SHARED_CONTAINER_ROOT_ENV`].
    ///
    /// # Errors
    /// Returns `FeedbaseError::OpenFailed` if no container root is configured
    /// or the group directory does not exist.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        let Some(group) = self.app_group.as_deref() else {
            return Ok(PathBuf::from(&self.db_path));
        };

        let root = self
            .container_root
            .clone()
            .or_else(|| std::env::var_os(SHARED_CONTAINER_ROOT_ENV).map(PathBuf::from))
            .ok_or_else(|| FeedbaseError::OpenFailed {
                path: PathBuf::from(&self.db_path),
                reason: format!("no shared container root configured for app group {group:?}"),
            })?;

        let container = root.join(group);
        if !container.is_dir() {
            return Err(FeedbaseError::OpenFailed {
                path: container,
                reason: format!("shared container for app group {group:?} does not exist"),
            });
        }
        Ok(container.join(&self.db_path))
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn app_group(mut self, group: impl Into<String>) -> Self {
        self.opts.app_group = Some(group.into());
        self
    }

    #[must_use]
    pub fn container_root(mut self, root: impl AsRef<Path>) -> Self {
        self.opts.container_root = Some(root.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn table_name(mut self, table: impl Into<String>) -> Self {
        self.opts.table_name = Some(table.into());
        self
    }

    #[must_use]
    pub fn busy_timeout_ms(mut self, millis: u64) -> Self {
        self.opts.busy_timeout_ms = millis;
        self
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open a [`Connection`] with these options.
    ///
    /// # Errors
    /// Returns `FeedbaseError::OpenFailed` if the path cannot be resolved or opened.
    pub fn open(self) -> Result<Connection> {
        Connection::open_with(&self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_is_used_verbatim() {
        let opts = SqliteOptions::new("data/feeds.db");
        assert_eq!(opts.resolve_path().unwrap(), PathBuf::from("data/feeds.db"));
    }

    #[test]
    fn app_group_resolves_inside_container() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("group.feeds")).unwrap();
        let opts = SqliteOptions::builder("feeds.db")
            .app_group("group.feeds")
            .container_root(root.path())
            .finish();
        assert_eq!(
            opts.resolve_path().unwrap(),
            root.path().join("group.feeds").join("feeds.db")
        );
    }

    #[test]
    fn missing_group_directory_is_open_failure() {
        let root = tempfile::tempdir().unwrap();
        let opts = SqliteOptions::builder("feeds.db")
            .app_group("group.absent")
            .container_root(root.path())
            .finish();
        assert!(matches!(
            opts.resolve_path(),
            Err(FeedbaseError::OpenFailed { .. })
        ));
    }

    #[test]
    fn json_defaults_apply() {
        let opts = SqliteOptions::from_json_str(r#"{ "db_path": "x.db" }"#).unwrap();
        assert_eq!(opts, SqliteOptions::new("x.db"));
        assert!(SqliteOptions::from_json_str("{}").is_err());
    }
}
