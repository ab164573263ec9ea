//! HTTP request handlers.
//!
//! Entity handlers are generic over the entity type `E` and the store `S`;
//! [`routing`](crate::routing) instantiates one set per collection.
//!
//! - [`create`] - create an entity
//! - [`update`] - replace or partially update an entity
//! - [`read`] - read an entity by identity
//! - [`delete`] - delete an entity
//! - [`list`] - list and count by criteria
//! - [`health`] - health and probe endpoints

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod read;
pub mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use list::{count_handler, list_handler};
pub use read::read_handler;
pub use update::{partial_update_handler, update_handler};
