use feedbase::prelude::*;
use tempfile::tempdir;

#[test]
fn open_creates_the_file_and_close_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("feeds.db");

    let mut conn = Connection::open(&path)?;
    assert!(conn.is_open());
    assert!(path.exists());
    assert_eq!(conn.path(), path.as_path());

    conn.close()?;
    assert!(!conn.is_open());
    conn.close()?;

    let err = conn.prepare("SELECT 1").unwrap_err();
    assert!(matches!(err, FeedbaseError::ConnectionError(_)));
    Ok(())
}

#[test]
fn open_in_missing_directory_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("no-such-dir").join("feeds.db");

    let err = Connection::open(&path).unwrap_err();
    match err {
        FeedbaseError::OpenFailed { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected OpenFailed, got {other:?}"),
    }
    Ok(())
}

#[test]
fn app_group_resolves_inside_the_shared_container() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    std::fs::create_dir(root.path().join("group.feedreader"))?;

    let conn = SqliteOptions::builder("feeds.db")
        .app_group("group.feedreader")
        .container_root(root.path())
        .open()?;
    assert_eq!(
        conn.path(),
        root.path().join("group.feedreader").join("feeds.db")
    );
    assert_eq!(conn.app_group(), Some("group.feedreader"));
    assert!(conn.path().exists());
    Ok(())
}

#[test]
fn missing_app_group_container_is_an_open_failure() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;

    let err = SqliteOptions::builder("feeds.db")
        .app_group("group.absent")
        .container_root(root.path())
        .open()
        .unwrap_err();
    assert!(matches!(err, FeedbaseError::OpenFailed { .. }));
    Ok(())
}

#[test]
fn options_load_from_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("configured.db");
    let json = format!(
        r#"{{ "db_path": {:?}, "table_name": "feed", "busy_timeout_ms": 250, "wal": false }}"#,
        path.to_string_lossy()
    );

    let opts = SqliteOptions::from_json_str(&json)?;
    assert_eq!(opts.busy_timeout_ms, 250);
    assert!(!opts.wal);

    let conn = Connection::open_with(&opts)?;
    assert_eq!(conn.table_name(), Some("feed"));
    Ok(())
}

#[test]
fn version_is_exported() {
    assert!(!feedbase::VERSION.is_empty());
}
