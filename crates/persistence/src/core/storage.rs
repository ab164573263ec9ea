//! CRUD storage trait.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::model::Entity;

/// CRUD operations for one entity type.
///
/// Each call runs in its own transaction. Identity and required-field checks
/// belong to the caller (see [`CrudService`](crate::service::CrudService));
/// implementations only surface store failures.
#[async_trait]
pub trait EntityStorage<E: Entity>: Send + Sync {
    /// Inserts `entity` and returns it with the assigned identity.
    ///
    /// # Errors
    ///
    /// * `ResourceError::Conflict` - a unique column already holds the value
    /// * `ValidationError::InvalidReference` - a relation points at a missing row
    async fn insert(&self, entity: E) -> StorageResult<E>;

    /// Replaces every column of the row identified by `entity.id()`.
    ///
    /// # Errors
    ///
    /// * `ValidationError::IdentityMissing` - `entity` has no identity
    /// * `ResourceError::NotFound` - no row has that identity
    async fn update(&self, entity: E) -> StorageResult<E>;

    /// Reads, merges `patch` into, and writes back the row with `id` in one
    /// transaction.
    ///
    /// Returns `Ok(None)` if no such row exists.
    async fn merge(&self, id: i64, patch: E::Patch) -> StorageResult<Option<E>>;

    /// Returns every row in identity order.
    async fn find_all(&self) -> StorageResult<Vec<E>>;

    /// Returns the row with `id`, if any.
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<E>>;

    /// Returns true if a row with `id` exists.
    async fn exists(&self, id: i64) -> StorageResult<bool>;

    /// Deletes the row with `id`. Returns false if there was none.
    async fn delete(&self, id: i64) -> StorageResult<bool>;
}
