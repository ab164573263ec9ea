use std::sync::Arc;

use tracing::debug;

use crate::core::{EntityQuery, StoreFor};
use crate::error::StorageResult;
use crate::model::Entity;
use crate::types::{Page, PageRequest, SortDirective};

/// Read-only criteria queries for any entity.
#[derive(Debug)]
pub struct QueryService<S> {
    storage: Arc<S>,
}

impl<S> Clone for QueryService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S> QueryService<S> {
    /// Creates a service over `storage`.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Returns every entity matching `criteria`, in identity order unless
    /// `sort` says otherwise.
    pub async fn find_by_criteria<E>(
        &self,
        criteria: &E::Criteria,
        sort: &[SortDirective],
    ) -> StorageResult<Vec<E>>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, ?criteria, "find by criteria");
        EntityQuery::<E>::find_by_criteria(self.storage.as_ref(), criteria, sort).await
    }

    /// Returns one page of entities matching `criteria`.
    pub async fn find_page<E>(
        &self,
        criteria: &E::Criteria,
        page: &PageRequest,
    ) -> StorageResult<Page<E>>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, ?criteria, page = page.page, size = page.size, "find by criteria");
        EntityQuery::<E>::find_page_by_criteria(self.storage.as_ref(), criteria, page).await
    }

    /// Counts entities matching `criteria`.
    pub async fn count<E>(&self, criteria: &E::Criteria) -> StorageResult<u64>
    where
        E: Entity,
        S: StoreFor<E>,
    {
        debug!(entity = E::ENTITY_NAME, ?criteria, "count by criteria");
        EntityQuery::<E>::count_by_criteria(self.storage.as_ref(), criteria).await
    }
}
