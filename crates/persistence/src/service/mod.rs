//! Entity services.
//!
//! [`CrudService`] and [`QueryService`] sit between the REST layer and the
//! storage traits. One instance of each serves every entity type: the entity
//! is chosen per call through the type parameter.
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn demo() -> roomkeeper_persistence::StorageResult<()> {
//! use std::sync::Arc;
//!
//! use roomkeeper_persistence::backends::sqlite::SqliteBackend;
//! use roomkeeper_persistence::criteria::{Criteria, RoomCriteria};
//! use roomkeeper_persistence::model::Room;
//! use roomkeeper_persistence::service::{CrudService, QueryService};
//!
//! let backend = Arc::new(SqliteBackend::in_memory()?);
//! backend.init_schema()?;
//!
//! let crud = CrudService::new(backend.clone());
//! crud.create(Room::new("101").with_floor(1)).await?;
//!
//! let queries = QueryService::new(backend);
//! let criteria = RoomCriteria::from_params([("floor.lessThan", "2")])?;
//! let rooms: Vec<Room> = queries.find_by_criteria(&criteria, &[]).await?;
//! assert_eq!(rooms.len(), 1);
//! # Ok(())
//! # }
//! ```

mod crud;
mod query;

pub use crud::CrudService;
pub use query::QueryService;
