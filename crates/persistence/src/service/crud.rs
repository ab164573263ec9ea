use std::sync::Arc;

use tracing::debug;

use crate::core::{EntityStorage, StoreFor};
use crate::error::{StorageResult, ValidationError};
use crate::model::{Entity, EntityPatch};

/// Create, update, partial update, lookup and delete for any entity.
///
/// Identity preconditions are checked here, before the store is touched.
#[derive(Debug)]
pub struct CrudService<S> {
    storage: Arc<S>,
}

impl<S> Clone for CrudService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S> CrudService<S> {
    /// Creates a service over `storage`.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Persists a new entity and returns it with its identity.
    ///
    /// # Errors
    ///
    /// * `ValidationError::IdentityPresent` - `entity` already has an identity
    /// * `ValidationError::MissingRequiredField` - a required field is blank
    pub async fn create<E>(&self, entity: E) -> StorageResult<E>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, "Request to save entity");
        if entity.id().is_some() {
            return Err(ValidationError::IdentityPresent {
                entity: E::ENTITY_NAME.to_string(),
            }
            .into());
        }
        entity.validate()?;
        self.storage.insert(entity).await
    }

    /// Replaces every field of the entity at `id`.
    ///
    /// # Errors
    ///
    /// * `ValidationError::IdentityMissing` - the body has no identity
    /// * `ValidationError::IdentityMismatch` - the body identity differs from `id`
    /// * `ValidationError::IdentityNotFound` - nothing is stored at `id`
    pub async fn update<E>(&self, id: i64, entity: E) -> StorageResult<E>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, id, "Request to update entity");
        self.check_identity::<E>(id, entity.id()).await?;
        entity.validate()?;
        self.storage.update(entity).await
    }

    /// Overwrites the fields set on `patch` and leaves the rest untouched.
    ///
    /// Returns `Ok(None)` if the row disappeared after the identity check.
    pub async fn partial_update<E>(&self, id: i64, patch: E::Patch) -> StorageResult<Option<E>>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, id, "Request to partially update entity");
        self.check_identity::<E>(id, patch.id()).await?;
        self.storage.merge(id, patch).await
    }

    /// Returns every entity of type `E`.
    pub async fn find_all<E>(&self) -> StorageResult<Vec<E>>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, "Request to get all entities");
        self.storage.find_all().await
    }

    /// Returns the entity at `id`, if any.
    pub async fn find_one<E>(&self, id: i64) -> StorageResult<Option<E>>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, id, "Request to get entity");
        self.storage.find_by_id(id).await
    }

    /// Deletes the entity at `id`. Deleting a missing identity is a no-op.
    pub async fn delete<E>(&self, id: i64) -> StorageResult<()>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, id, "Request to delete entity");
        let deleted = EntityStorage::<E>::delete(self.storage.as_ref(), id).await?;
        if !deleted {
            debug!(entity = E::ENTITY_NAME, id, "Nothing to delete");
        }
        Ok(())
    }

    async fn check_identity<E>(&self, path_id: i64, body_id: Option<i64>) -> StorageResult<()>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        let entity = E::ENTITY_NAME.to_string();
        let Some(body_id) = body_id else {
            return Err(ValidationError::IdentityMissing { entity }.into());
        };
        if body_id != path_id {
            return Err(ValidationError::IdentityMismatch {
                entity,
                path_id,
                body_id,
            }
            .into());
        }
        if !EntityStorage::<E>::exists(self.storage.as_ref(), path_id).await? {
            return Err(ValidationError::IdentityNotFound {
                entity,
                id: path_id,
            }
            .into());
        }
        Ok(())
    }
}
