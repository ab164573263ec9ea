//! Roomkeeper persistence layer.
//!
//! Stores rooms, residents and facilities in a relational database and
//! answers dynamic filter queries over them.
//!
//! # Architecture
//!
//! - [`model`] - the three entities, their relations and patch types
//! - [`filter`] - typed filter primitives (equality, range, string, boolean)
//! - [`criteria`] - one filter aggregate per entity, parsed from
//!   `field.operator=value` parameters
//! - [`types`] - sorting and pagination
//! - [`core`] - storage and query traits
//! - [`service`] - CRUD and query services generic over the entity
//! - [`backends`] - the SQLite backend, including the specification builder
//!   that turns criteria into SQL
//! - [`error`] - error types for all operations
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! use roomkeeper_persistence::backends::sqlite::SqliteBackend;
//! use roomkeeper_persistence::criteria::{Criteria, FacilityCriteria};
//! use roomkeeper_persistence::model::{Facility, Room};
//! use roomkeeper_persistence::service::{CrudService, QueryService};
//!
//! let backend = Arc::new(SqliteBackend::in_memory()?);
//! backend.init_schema()?;
//! let crud = CrudService::new(backend.clone());
//! let queries = QueryService::new(backend);
//!
//! let room = crud.create(Room::new("101").with_floor(1)).await?;
//! let room_id = room.id.unwrap_or_default();
//! crud.create(Facility::new().with_wifi(true).with_room(room_id)).await?;
//!
//! let criteria = FacilityCriteria::from_params([("roomId.equals", "1")])?;
//! let found: Vec<Facility> = queries.find_by_criteria(&criteria, &[]).await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod model;
pub mod service;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Page, PageInfo, PageRequest, SortDirection, SortDirective};

// Re-export core traits
pub use core::{Backend, EntityQuery, EntityStorage, FacilityStore, StoreFor};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
