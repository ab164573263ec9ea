//! List and count handlers: `GET /api/{collection}` and
//! `GET /api/{collection}/count`

use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use roomkeeper_persistence::StoreFor;
use roomkeeper_persistence::model::Entity;
use tracing::{debug, warn};

use crate::error::RestResult;
use crate::extractors::{CriteriaQuery, ListParams};
use crate::responses::headers::{EntityHeaders, pagination_link};
use crate::state::AppState;

/// Handler for listing entities by criteria.
///
/// Without `page` or `size` every match is returned. With either, one
/// page is returned along with `X-Total-Count` and `Link` headers.
///
/// # Response
///
/// - `200 OK` - a JSON array of entities
/// - `400 Bad Request` - a filter value or sort property is invalid
///
/// # Example
///
/// ```http
/// GET /api/rooms?floor.lessThan=2&roomno.contains=10&sort=floor,desc&page=0&size=20 HTTP/1.1
/// ```
pub async fn list_handler<E, S>(
    State(state): State<AppState<S>>,
    uri: Uri,
    CriteriaQuery(criteria): CriteriaQuery<E::Criteria>,
    params: ListParams,
) -> RestResult<Response>
where
    E: Entity,
    S: StoreFor<E> + Send + Sync + 'static,
{
    debug!(entity = E::ENTITY_NAME, ?criteria, "Processing list request");

    let queries = state.queries();
    let page_request =
        params.page_request(state.default_page_size(), state.max_page_size())?;

    let Some(page_request) = page_request else {
        let items = queries
            .find_by_criteria::<E>(&criteria, params.sort())
            .await?;
        return Ok(Json(items).into_response());
    };

    let page = queries.find_page::<E>(&criteria, &page_request).await?;
    let link = match pagination_link(state.base_url(), &uri, &page.page_info) {
        Ok(link) => Some(link),
        Err(e) => {
            warn!(error = %e, "Cannot build pagination links");
            None
        }
    };

    debug!(
        entity = E::ENTITY_NAME,
        total = page.page_info.total,
        returned = page.len(),
        "List page assembled"
    );

    let headers = EntityHeaders::new()
        .with_page(&page.page_info, link)
        .to_header_map();

    Ok((StatusCode::OK, headers, Json(page.items)).into_response())
}

/// Handler for counting entities by criteria.
///
/// # Response
///
/// - `200 OK` - a JSON number
pub async fn count_handler<E, S>(
    State(state): State<AppState<S>>,
    CriteriaQuery(criteria): CriteriaQuery<E::Criteria>,
) -> RestResult<Response>
where
    E: Entity,
    S: StoreFor<E> + Send + Sync + 'static,
{
    debug!(entity = E::ENTITY_NAME, ?criteria, "Processing count request");

    let count = state.queries().count::<E>(&criteria).await?;
    Ok(Json(count).into_response())
}
