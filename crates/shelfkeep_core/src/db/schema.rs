//! Catalog table layout for the SQLite backend.
//!
//! # Invariants
//! - A fresh database gets both tables and `user_version` in one transaction.
//! - A database stamped with a newer version is refused, never rewritten.
//! - After preparation every column the repository reads is present, so a
//!   hand-edited or foreign database fails at open instead of mid-load.

use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;

/// Schema version written to `PRAGMA user_version`.
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

const CATALOG_SCHEMA_SQL: &str = include_str!("catalog_schema.sql");

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("books", &["position", "id", "title", "author", "available"]),
    ("users", &["position", "id", "name", "email", "role"]),
];

/// Creates the catalog tables on a fresh database and verifies their shape.
///
/// # Errors
/// - `RepoError::SchemaTooNew` when the file was written by a newer binary.
/// - `RepoError::MissingColumn` when a catalog table lacks a column.
pub fn prepare_catalog_schema(conn: &mut Connection) -> RepoResult<()> {
    let found = schema_version(conn)?;
    if found > CATALOG_SCHEMA_VERSION {
        return Err(RepoError::SchemaTooNew {
            found,
            supported: CATALOG_SCHEMA_VERSION,
        });
    }

    if found < CATALOG_SCHEMA_VERSION {
        let tx = conn.transaction()?;
        tx.execute_batch(CATALOG_SCHEMA_SQL)?;
        tx.execute_batch(&format!("PRAGMA user_version = {CATALOG_SCHEMA_VERSION};"))?;
        tx.commit()?;
    }

    verify_catalog_tables(conn)
}

/// Current `user_version` of the database.
pub fn schema_version(conn: &Connection) -> RepoResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

fn verify_catalog_tables(conn: &Connection) -> RepoResult<()> {
    for (table, columns) in REQUIRED_COLUMNS {
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
        let present = stmt
            .query_map([*table], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(column) = columns
            .iter()
            .find(|column| !present.iter().any(|name| name.as_str() == **column))
        {
            return Err(RepoError::MissingColumn {
                table: *table,
                column: *column,
            });
        }
    }
    Ok(())
}
