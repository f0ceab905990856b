use std::path::Path;

use feedbase::prelude::*;
use tempfile::tempdir;

fn open_counter(path: &Path) -> Result<Connection, Box<dyn std::error::Error>> {
    let mut conn = Connection::open(path)?;
    conn.execute_batch("CREATE TABLE IF NOT EXISTS counter (id INTEGER PRIMARY KEY, n INTEGER);")?;
    Ok(conn)
}

fn count(conn: &mut Connection) -> Result<i64, Box<dyn std::error::Error>> {
    Ok(conn.scalar("SELECT COUNT(*) FROM counter", &[])?.as_int().unwrap_or(-1))
}

#[test]
fn committed_writes_survive_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("tx.db");

    let mut conn = open_counter(&path)?;
    conn.begin()?;
    assert!(conn.in_transaction());
    for n in 0..5 {
        conn.exec_write("INSERT INTO counter (n) VALUES (?1)", &[n.into()])?;
    }
    conn.commit()?;
    assert!(!conn.in_transaction());
    conn.close()?;

    let mut reopened = open_counter(&path)?;
    assert_eq!(count(&mut reopened)?, 5);
    Ok(())
}

#[test]
fn uncommitted_writes_are_lost_when_the_connection_goes_away()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("tx.db");

    let mut writer = open_counter(&path)?;
    writer.begin()?;
    writer.exec_write("INSERT INTO counter (n) VALUES (1)", &[])?;

    let mut reader = Connection::open(&path)?;
    assert_eq!(count(&mut reader)?, 0);

    drop(writer);
    assert_eq!(count(&mut reader)?, 0);
    Ok(())
}

#[test]
fn nesting_and_stray_commits_are_state_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut conn = open_counter(&dir.path().join("tx.db"))?;

    let err = conn.commit().unwrap_err();
    assert!(matches!(err, FeedbaseError::TransactionStateError(_)));
    let err = conn.rollback().unwrap_err();
    assert!(matches!(err, FeedbaseError::TransactionStateError(_)));

    conn.begin()?;
    let err = conn.begin().unwrap_err();
    assert!(matches!(err, FeedbaseError::TransactionStateError(_)));
    assert!(conn.in_transaction());
    conn.rollback()?;
    assert!(!conn.in_transaction());
    Ok(())
}

#[test]
fn failed_statement_leaves_the_transaction_open() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut conn = open_counter(&dir.path().join("tx.db"))?;

    conn.begin()?;
    conn.exec_write("INSERT INTO counter (id, n) VALUES (1, 1)", &[])?;
    let err = conn
        .exec_write("INSERT INTO counter (id, n) VALUES (1, 2)", &[])
        .unwrap_err();
    assert!(matches!(err, FeedbaseError::StepFailed(_)));
    assert!(conn.in_transaction());
    conn.commit()?;

    assert_eq!(count(&mut conn)?, 1);
    Ok(())
}

#[test]
fn guard_rolls_back_unless_committed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut conn = open_counter(&dir.path().join("tx.db"))?;

    {
        let mut tx = conn.transaction()?;
        tx.exec_write("INSERT INTO counter (n) VALUES (1)", &[])?;
        assert_eq!(count(&mut tx)?, 1);
    }
    assert!(!conn.in_transaction());
    assert_eq!(count(&mut conn)?, 0);

    let mut tx = conn.transaction()?;
    tx.exec_write("INSERT INTO counter (n) VALUES (2)", &[])?;
    tx.commit()?;
    assert_eq!(count(&mut conn)?, 1);

    let mut tx = conn.transaction()?;
    tx.exec_write("INSERT INTO counter (n) VALUES (3)", &[])?;
    tx.rollback()?;
    assert_eq!(count(&mut conn)?, 1);
    Ok(())
}
