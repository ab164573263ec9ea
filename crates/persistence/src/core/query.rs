//! Criteria query trait.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::model::Entity;
use crate::types::{Page, PageRequest, SortDirective};

/// Read-only criteria queries for one entity type.
///
/// Every filter set on the criteria must hold; unset filters impose nothing.
/// Results are ordered by `sort`, then by identity.
#[async_trait]
pub trait EntityQuery<E: Entity>: Send + Sync {
    /// Returns every matching row.
    async fn find_by_criteria(
        &self,
        criteria: &E::Criteria,
        sort: &[SortDirective],
    ) -> StorageResult<Vec<E>>;

    /// Returns one page of matching rows plus the total match count.
    async fn find_page_by_criteria(
        &self,
        criteria: &E::Criteria,
        page: &PageRequest,
    ) -> StorageResult<Page<E>>;

    /// Counts matching rows.
    async fn count_by_criteria(&self, criteria: &E::Criteria) -> StorageResult<u64>;
}
