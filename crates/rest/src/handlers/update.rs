//! Update handlers: `PUT` and `PATCH /api/{collection}/{id}`

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roomkeeper_persistence::StoreFor;
use roomkeeper_persistence::model::Entity;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::EntityBody;
use crate::responses::headers::{EntityAction, EntityHeaders};
use crate::state::AppState;

/// Handler for replacing an entity.
///
/// The body identity must equal the path identity, and the entity must
/// exist.
///
/// # Response
///
/// - `200 OK` - with alert headers, returns the stored entity
/// - `400 Bad Request` - `idnull`, `idinvalid` or `idnotfound`
pub async fn update_handler<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    EntityBody(entity): EntityBody<E>,
) -> RestResult<Response>
where
    E: Entity,
    S: StoreFor<E> + Send + Sync + 'static,
{
    debug!(entity = E::ENTITY_NAME, id, "Processing update request");

    let updated = state.crud().update(id, entity).await?;
    let headers = EntityHeaders::new()
        .with_alert(E::ENTITY_NAME, EntityAction::Updated, id)
        .to_header_map();

    Ok((StatusCode::OK, headers, Json(updated)).into_response())
}

/// Handler for a partial update.
///
/// Accepts `application/json` and `application/merge-patch+json`. Fields
/// absent from the body are left untouched; relations are never changed.
///
/// # Response
///
/// - `200 OK` - with alert headers, returns the merged entity
/// - `400 Bad Request` - `idnull`, `idinvalid` or `idnotfound`
/// - `404 Not Found` - the entity vanished between check and merge
///
/// # Example
///
/// ```http
/// PATCH /api/residents/3 HTTP/1.1
/// Content-Type: application/merge-patch+json
///
/// {"id": 3, "phonenumber": "555-0199"}
/// ```
pub async fn partial_update_handler<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    EntityBody(patch): EntityBody<E::Patch>,
) -> RestResult<Response>
where
    E: Entity,
    S: StoreFor<E> + Send + Sync + 'static,
{
    debug!(entity = E::ENTITY_NAME, id, ?patch, "Processing partial update request");

    let merged = state
        .crud()
        .partial_update::<E>(id, patch)
        .await?
        .ok_or_else(|| RestError::NotFound {
            entity: E::ENTITY_NAME.to_string(),
            id,
        })?;

    let headers = EntityHeaders::new()
        .with_alert(E::ENTITY_NAME, EntityAction::Updated, id)
        .to_header_map();

    Ok((StatusCode::OK, headers, Json(merged)).into_response())
}
