//! Read handler: `GET /api/{collection}/{id}`

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use roomkeeper_persistence::StoreFor;
use roomkeeper_persistence::model::Entity;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for reading an entity by identity.
///
/// # Response
///
/// - `200 OK` - returns the entity
/// - `404 Not Found` - no entity with that identity
pub async fn read_handler<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> RestResult<Response>
where
    E: Entity,
    S: StoreFor<E> + Send + Sync + 'static,
{
    debug!(entity = E::ENTITY_NAME, id, "Processing read request");

    match state.crud().find_one::<E>(id).await? {
        Some(entity) => Ok(Json(entity).into_response()),
        None => Err(RestError::NotFound {
            entity: E::ENTITY_NAME.to_string(),
            id,
        }),
    }
}
