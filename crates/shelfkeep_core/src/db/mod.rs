//! SQLite bootstrap for the embedded catalog backend.
//!
//! Connections returned here carry the catalog schema (`books`, `users`)
//! at the version this binary understands, or the open fails.

use crate::repo::{RepoError, RepoResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

pub mod schema;

/// Opens (or creates) a catalog database file and prepares its schema.
///
/// # Side effects
/// - Emits `db_open` events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> RepoResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory catalog database.
pub fn open_db_in_memory() -> RepoResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> RepoResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let prepared = connect().map_err(RepoError::from).and_then(bootstrap);

    match &prepared {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    prepared
}

fn bootstrap(mut conn: Connection) -> RepoResult<Connection> {
    conn.busy_timeout(Duration::from_secs(5))?;
    schema::prepare_catalog_schema(&mut conn)?;
    Ok(conn)
}
