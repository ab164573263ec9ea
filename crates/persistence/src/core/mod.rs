//! Core storage traits.
//!
//! - [`Backend`]: health and schema bootstrap of a database driver
//! - [`EntityStorage`]: CRUD for one entity type
//! - [`EntityQuery`]: criteria-driven lists, pages and counts
//! - [`FacilityStore`]: everything the services and REST layer need, for all
//!   three entities
//!
//! The traits are generic over [`Entity`](crate::model::Entity), so a backend
//! implements each one once and gets every entity type.

mod backend;
mod query;
mod storage;

pub use backend::Backend;
pub use query::EntityQuery;
pub use storage::EntityStorage;

use crate::model::{Entity, Facility, Resident, Room};

/// A backend that stores and queries every entity of the model.
pub trait FacilityStore:
    Backend
    + EntityStorage<Room>
    + EntityStorage<Resident>
    + EntityStorage<Facility>
    + EntityQuery<Room>
    + EntityQuery<Resident>
    + EntityQuery<Facility>
    + 'static
{
}

impl<T> FacilityStore for T where
    T: Backend
        + EntityStorage<Room>
        + EntityStorage<Resident>
        + EntityStorage<Facility>
        + EntityQuery<Room>
        + EntityQuery<Resident>
        + EntityQuery<Facility>
        + 'static
{
}

/// Marker for entities a [`FacilityStore`] can persist.
///
/// Lets generic code over `E` ask for both storage traits with one bound.
pub trait StoreFor<E: Entity>: EntityStorage<E> + EntityQuery<E> {}

impl<S, E> StoreFor<E> for S
where
    E: Entity,
    S: EntityStorage<E> + EntityQuery<E>,
{
}
