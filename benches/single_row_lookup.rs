//! Criterion comparison of single-row SELECT latency for raw `rusqlite` vs.
//! feedbase's statement layer. Every variant reads the same seeded file, so the
//! numbers isolate binding and row marshalling overhead.

use std::cell::RefCell;
use std::hint::black_box;
use std::path::Path;
use std::rc::Rc;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use feedbase::{Connection, DbRow, RowValues};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rusqlite::{Row, params};
use tempfile::TempDir;

const LOOKUP_SQL: &str = "SELECT id, name, score, active FROM test WHERE id = ?1";

/// Seeded database file plus a deterministic, shuffled id workload.
struct Dataset {
    _dir: TempDir,
    path: std::path::PathBuf,
    ids: Vec<i64>,
}

static DATASET: LazyLock<Dataset> = LazyLock::new(|| {
    let row_count = lookup_row_count();
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("single_lookup.db");
    prepare_sqlite_dataset(&path, row_count).expect("failed to prepare SQLite dataset");

    let mut ids: Vec<i64> = (1..=row_count as i64).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(1_234_567_890);
    ids.shuffle(&mut rng);

    Dataset {
        _dir: dir,
        path,
        ids,
    }
});

fn lookup_row_count() -> usize {
    std::env::var("BENCH_ROWS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(1000)
}

fn prepare_sqlite_dataset(path: &Path, row_count: usize) -> rusqlite::Result<()> {
    let mut conn = rusqlite::Connection::open(path)?;
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        CREATE TABLE test (
            id      INTEGER PRIMARY KEY,
            name    TEXT NOT NULL,
            score   REAL NOT NULL,
            active  INTEGER NOT NULL
        );
        ",
    )?;

    let transaction = conn.transaction()?;
    {
        let mut insert_stmt = transaction
            .prepare("INSERT INTO test (id, name, score, active) VALUES (?1, ?2, ?3, ?4)")?;
        for id in 1..=row_count as i64 {
            let name = format!("name-{id}");
            let score = id as f64 * 0.5;
            let active = id % 2 == 0;
            insert_stmt.execute(params![id, name, score, active])?;
        }
    }
    transaction.commit()
}

/// Decoded row shared by every variant so decoding cost is identical.
#[derive(Debug)]
struct BenchRow {
    id: i64,
    name: String,
    score: f64,
    active: bool,
}

impl BenchRow {
    fn from_rusqlite(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            score: row.get(2)?,
            active: row.get(3)?,
        })
    }

    fn from_db_row(row: &DbRow) -> Self {
        Self {
            id: row.get("id").and_then(RowValues::as_int).expect("integer id"),
            name: row
                .get("name")
                .and_then(RowValues::as_text)
                .expect("text name")
                .to_owned(),
            score: row.get("score").and_then(RowValues::as_float).expect("numeric score"),
            active: row.get("active").and_then(RowValues::as_bool).expect("boolean active"),
        }
    }
}

/// Raw `rusqlite` baseline using a cached prepared statement.
fn benchmark_rusqlite_direct(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
) {
    let dataset = &*DATASET;
    let ids = dataset.ids.clone();
    let connection = rusqlite::Connection::open(&dataset.path).expect("open sqlite connection");
    let statement = connection
        .prepare_cached(LOOKUP_SQL)
        .expect("prepare select statement");
    let statement = Rc::new(RefCell::new(statement));

    group.bench_function(BenchmarkId::new("rusqlite", ids.len()), |b| {
        let statement = statement.clone();
        b.iter_custom(|iters| {
            let mut total = Duration::default();
            for _ in 0..iters {
                let mut stmt = statement.borrow_mut();
                let start = Instant::now();
                for &id in &ids {
                    let row = stmt
                        .query_row([id], |row| BenchRow::from_rusqlite(row))
                        .expect("query row");
                    black_box(row);
                }
                total += start.elapsed();
            }
            total
        });
    });
}

/// Prepare, bind and step through `Connection::query_row` for every lookup.
fn benchmark_query_row(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
) {
    let dataset = &*DATASET;
    let ids = dataset.ids.clone();
    let mut conn = Connection::open(&dataset.path).expect("open feedbase connection");

    group.bench_function(BenchmarkId::new("feedbase_query_row", ids.len()), |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::default();
            let mut params = [RowValues::Int(0)];
            for _ in 0..iters {
                let start = Instant::now();
                for &id in &ids {
                    params[0] = RowValues::Int(id);
                    let row = conn
                        .query_row(LOOKUP_SQL, &params)
                        .expect("query row")
                        .expect("row exists");
                    black_box(BenchRow::from_db_row(&row));
                }
                total += start.elapsed();
            }
            total
        });
    });
}

/// Lazy iteration through `Connection::rows`, abandoning after the first row.
fn benchmark_lazy_rows(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
) {
    let dataset = &*DATASET;
    let ids = dataset.ids.clone();
    let mut conn = Connection::open(&dataset.path).expect("open feedbase connection");

    group.bench_function(BenchmarkId::new("feedbase_rows", ids.len()), |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::default();
            for _ in 0..iters {
                let start = Instant::now();
                for &id in &ids {
                    let mut stmt = conn
                        .rows(LOOKUP_SQL, &[RowValues::Int(id)])
                        .expect("prepare lookup");
                    if let Some(row) = stmt.rows().next() {
                        black_box(BenchRow::from_db_row(&row.expect("step row")));
                    }
                }
                total += start.elapsed();
            }
            total
        });
    });
}

fn sqlite_single_row_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqlite_single_row_lookup");
    group.throughput(Throughput::Elements(DATASET.ids.len() as u64));

    benchmark_rusqlite_direct(&mut group);
    benchmark_query_row(&mut group);
    benchmark_lazy_rows(&mut group);

    group.finish();
}

criterion_group!(benches, sqlite_single_row_lookup);
criterion_main!(benches);
