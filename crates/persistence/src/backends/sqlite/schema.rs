//! SQLite schema bootstrap.
//!
//! The schema is fixed and versioned. [`initialize_schema`] creates it on a
//! fresh database and leaves an up-to-date database untouched.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Backend(BackendError::MigrationError {
            message: format!(
                "database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            ),
        }));
    }

    Ok(())
}

/// Get the current schema version, 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("create schema_version table", e))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error("clear schema_version", e))?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| migration_error("set schema_version", e))?;
    Ok(())
}

fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS room (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            roomno TEXT NOT NULL UNIQUE,
            floor INTEGER,
            type TEXT
        );

        CREATE TABLE IF NOT EXISTS resident (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            firstname TEXT,
            lastname TEXT,
            email TEXT NOT NULL,
            phonenumber TEXT,
            room_id INTEGER REFERENCES room(id) ON DELETE SET NULL
        );

        CREATE TABLE IF NOT EXISTS facility (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            a_c INTEGER,
            parking INTEGER,
            wifi INTEGER,
            room_id INTEGER UNIQUE REFERENCES room(id) ON DELETE SET NULL
        );",
    )
    .map_err(|e| migration_error("create entity tables", e))?;

    create_indexes(conn)
}

fn create_indexes(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_resident_room ON resident(room_id);
        CREATE INDEX IF NOT EXISTS idx_room_floor ON room(floor);",
    )
    .map_err(|e| migration_error("create indexes", e))
}

fn migration_error(step: &str, err: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::MigrationError {
        message: format!("Failed to {}: {}", step, err),
    })
}
