//! Delete handler: `DELETE /api/{collection}/{id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roomkeeper_persistence::StoreFor;
use roomkeeper_persistence::model::Entity;
use tracing::debug;

use crate::error::RestResult;
use crate::responses::headers::{EntityAction, EntityHeaders};
use crate::state::AppState;

/// Handler for deleting an entity.
///
/// Deleting an identity that does not exist still answers `204`. Residents
/// and the facility of a deleted room keep existing without a room.
///
/// # Response
///
/// - `204 No Content` - with alert headers
pub async fn delete_handler<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> RestResult<Response>
where
    E: Entity,
    S: StoreFor<E> + Send + Sync + 'static,
{
    debug!(entity = E::ENTITY_NAME, id, "Processing delete request");

    state.crud().delete::<E>(id).await?;

    let headers = EntityHeaders::new()
        .with_alert(E::ENTITY_NAME, EntityAction::Deleted, id)
        .to_header_map();

    Ok((StatusCode::NO_CONTENT, headers).into_response())
}
