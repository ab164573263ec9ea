//! EntityQuery implementation for SQLite.

use async_trait::async_trait;
use rusqlite::{Connection, params_from_iter};

use crate::core::EntityQuery;
use crate::error::{SearchError, StorageResult};
use crate::types::{Page, PageInfo, PageRequest, SortDirective};

use super::SqliteBackend;
use super::mapping::{SqliteEntity, select_columns};
use super::specification::{ROOT_ALIAS, Specification};

/// Builds the ORDER BY clause: explicit directives, then identity.
pub(crate) fn order_by<E: SqliteEntity>(sort: &[SortDirective]) -> StorageResult<String> {
    let mut terms = Vec::with_capacity(sort.len() + 1);
    let mut has_id = false;
    for directive in sort {
        let column = E::sort_column(&directive.property).ok_or_else(|| {
            SearchError::UnsupportedSortProperty {
                entity: E::ENTITY_NAME.to_string(),
                property: directive.property.clone(),
            }
        })?;
        has_id |= column == "id";
        terms.push(format!(
            "{}.{} {}",
            ROOT_ALIAS,
            column,
            directive.direction.as_sql()
        ));
    }
    if !has_id {
        terms.push(format!("{}.id ASC", ROOT_ALIAS));
    }
    Ok(terms.join(", "))
}

fn select<E: SqliteEntity>(
    conn: &Connection,
    spec: &Specification,
    order: &str,
    page: Option<(u32, u64)>,
) -> StorageResult<Vec<E>> {
    let sql = spec.select_sql(&select_columns::<E>(), order, page);
    tracing::trace!(entity = E::ENTITY_NAME, %sql, "Executing criteria query");

    let mut stmt = conn.prepare(&sql)?;
    let mut entities = stmt
        .query_map(params_from_iter(&spec.predicate.params), E::from_row)?
        .collect::<rusqlite::Result<Vec<E>>>()?;
    for entity in &mut entities {
        entity.load_relations(conn)?;
    }
    Ok(entities)
}

fn count(conn: &Connection, spec: &Specification) -> StorageResult<u64> {
    let total: i64 = conn.query_row(
        &spec.count_sql(),
        params_from_iter(&spec.predicate.params),
        |row| row.get(0),
    )?;
    Ok(u64::try_from(total).unwrap_or_default())
}

impl SqliteBackend {
    pub(crate) fn query_entities<E: SqliteEntity>(
        &self,
        criteria: &E::Criteria,
        sort: &[SortDirective],
        page: Option<(u32, u64)>,
    ) -> StorageResult<Vec<E>> {
        let spec = E::specification(criteria);
        let order = order_by::<E>(sort)?;

        let mut conn = self.get_connection()?;
        let tx = conn.transaction()?;
        let entities = select::<E>(&tx, &spec, &order, page)?;
        tx.commit()?;
        Ok(entities)
    }

    fn query_page<E: SqliteEntity>(
        &self,
        criteria: &E::Criteria,
        request: &PageRequest,
    ) -> StorageResult<Page<E>> {
        if request.size == 0 {
            return Err(SearchError::InvalidPageRequest {
                message: "page size must be at least 1".to_string(),
            }
            .into());
        }
        let spec = E::specification(criteria);
        let order = order_by::<E>(&request.sort)?;

        let mut conn = self.get_connection()?;
        let tx = conn.transaction()?;
        let total = count(&tx, &spec)?;
        let items = select::<E>(&tx, &spec, &order, Some((request.size, request.offset())))?;
        tx.commit()?;

        Ok(Page::new(items, PageInfo::new(request, total)))
    }

    fn query_count<E: SqliteEntity>(&self, criteria: &E::Criteria) -> StorageResult<u64> {
        let spec = E::specification(criteria);
        let conn = self.get_connection()?;
        count(&conn, &spec)
    }
}

#[async_trait]
impl<E: SqliteEntity> EntityQuery<E> for SqliteBackend {
    async fn find_by_criteria(
        &self,
        criteria: &E::Criteria,
        sort: &[SortDirective],
    ) -> StorageResult<Vec<E>> {
        self.query_entities::<E>(criteria, sort, None)
    }

    async fn find_page_by_criteria(
        &self,
        criteria: &E::Criteria,
        page: &PageRequest,
    ) -> StorageResult<Page<E>> {
        self.query_page::<E>(criteria, page)
    }

    async fn count_by_criteria(&self, criteria: &E::Criteria) -> StorageResult<u64> {
        self.query_count::<E>(criteria)
    }
}
