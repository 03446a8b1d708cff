//! SQLite connection, migrations and the per-operation session scope.

use crate::error::AppError;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct DbPool(pub Mutex<Connection>);

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

/// Initialize DB at path, run migrations, return managed pool.
pub fn init_db(db_path: &Path) -> Result<DbPool, AppError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Db(e.to_string()))?;
    }
    let conn = Connection::open(db_path)?;
    open_pool(conn)
}

/// In-memory database with the full schema, for tests and throwaway runs.
pub fn init_memory_db() -> Result<DbPool, AppError> {
    open_pool(Connection::open_in_memory()?)
}

/// Test helper: in-memory pool, panics if the schema cannot be created.
pub fn init_test_db() -> DbPool {
    init_memory_db().expect("in-memory test database")
}

fn open_pool(mut conn: Connection) -> Result<DbPool, AppError> {
    // Foreign keys are per-connection in SQLite and off by default.
    conn.pragma_update(None, "foreign_keys", "ON")?;
    run_migrations(&mut conn)?;
    Ok(DbPool(Mutex::new(conn)))
}

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    // Ensure schema_migrations exists (first run)
    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // Skip the INSERT into schema_migrations in the script - we do it ourselves
        let statements = sql
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"));
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::info!("applied schema migration {}", version);
    }

    tx.commit()?;
    Ok(())
}

/// Lock the single connection. A poisoned lock is recovered: any transaction
/// that was open when the holder panicked has already been rolled back.
pub fn get_connection(pool: &DbPool) -> MutexGuard<'_, Connection> {
    pool.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `f` as one unit of work.
///
/// The connection is held for the whole call and a transaction is opened
/// around `f`. `Ok` commits; `Err` rolls back and the error is returned as-is.
/// The connection is released on every path, and a panic inside `f` rolls the
/// transaction back when it is dropped.
///
/// Scopes do not nest: `f` must only use the transaction it is given, never
/// call back into a function that takes the pool.
pub fn session_scope<T, F>(pool: &DbPool, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, AppError>,
{
    let mut conn = get_connection(pool);
    let tx = conn.transaction()?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rb) = tx.rollback() {
                log::warn!("rollback failed after {}: {}", err.code(), rb);
            }
            Err(err)
        }
    }
}
