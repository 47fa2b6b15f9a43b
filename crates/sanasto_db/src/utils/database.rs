//! Opening and preparing SQLite connections.

use diesel::{connection::SimpleConnection, prelude::*, sql_types::Text};
use eyre::WrapErr;
use std::path::Path;

/// Opens a connection to the database file, creating it if needed, with foreign keys enforced.
pub fn establish(path: &Path) -> eyre::Result<SqliteConnection> {
    let url = path
        .to_str()
        .ok_or_else(|| eyre::eyre!("Invalid database path '{}'", path.display()))?;
    tracing::info!("Opening {url}");
    let mut conn = SqliteConnection::establish(url)
        .wrap_err_with(|| format!("Failed to open database at '{url}'"))?;
    enable_foreign_keys(&mut conn)?;
    Ok(conn)
}

pub fn enable_foreign_keys(conn: &mut SqliteConnection) -> eyre::Result<()> {
    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .wrap_err("Failed to enable foreign keys")
}

/// Tunes the connection for a long write-heavy import.
pub fn prepare_for_import(conn: &mut SqliteConnection) -> eyre::Result<()> {
    conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
        .wrap_err("Failed to configure database for import")
}

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

pub fn table_exists(conn: &mut SqliteConnection, table: &str) -> eyre::Result<bool> {
    let count = diesel::sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind::<Text, _>(table)
    .get_result::<Count>(conn)
    .wrap_err_with(|| format!("Failed to check for table '{table}'"))?;
    Ok(count.count > 0)
}
