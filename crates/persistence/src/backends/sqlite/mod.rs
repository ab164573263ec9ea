//! SQLite backend implementation.
//!
//! Implements [`EntityStorage`](crate::core::EntityStorage) and
//! [`EntityQuery`](crate::core::EntityQuery) for every entity with a
//! [`SqliteEntity`] mapping. Works with in-memory databases (tests) and
//! file databases.
//!
//! # Example
//!
//! ```no_run
//! use roomkeeper_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE room (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     roomno TEXT NOT NULL UNIQUE,
//!     floor INTEGER,
//!     type TEXT
//! );
//!
//! CREATE TABLE resident (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     firstname TEXT,
//!     lastname TEXT,
//!     email TEXT NOT NULL,
//!     phonenumber TEXT,
//!     room_id INTEGER REFERENCES room(id) ON DELETE SET NULL
//! );
//!
//! CREATE TABLE facility (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     a_c INTEGER,
//!     parking INTEGER,
//!     wifi INTEGER,
//!     room_id INTEGER UNIQUE REFERENCES room(id) ON DELETE SET NULL
//! );
//! ```

mod backend;
mod mapping;
mod query;
pub mod schema;
pub mod specification;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use mapping::SqliteEntity;
