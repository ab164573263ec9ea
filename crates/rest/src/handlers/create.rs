//! Create handler: `POST /api/{collection}`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roomkeeper_persistence::StoreFor;
use roomkeeper_persistence::model::Entity;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::EntityBody;
use crate::responses::headers::{EntityAction, EntityHeaders, location_url};
use crate::state::AppState;

/// Handler for creating an entity. The store assigns the identity.
///
/// # Response
///
/// - `201 Created` - with `Location` and alert headers, returns the entity
/// - `400 Bad Request` - the body already has an identity (`idexists`) or a
///   required field is blank
///
/// # Example
///
/// ```http
/// POST /api/rooms HTTP/1.1
/// Content-Type: application/json
///
/// {"roomno": "101", "floor": 1, "type": "single"}
/// ```
pub async fn create_handler<E, S>(
    State(state): State<AppState<S>>,
    EntityBody(entity): EntityBody<E>,
) -> RestResult<Response>
where
    E: Entity,
    S: StoreFor<E> + Send + Sync + 'static,
{
    debug!(entity = E::ENTITY_NAME, "Processing create request");

    let created = state.crud().create(entity).await?;
    let id = created.id().ok_or_else(|| RestError::InternalError {
        message: format!("created {} has no identity", E::ENTITY_NAME),
    })?;

    let location =
        location_url(state.base_url(), E::COLLECTION, id).map_err(|e| RestError::InternalError {
            message: format!("cannot build Location from base URL: {}", e),
        })?;

    debug!(entity = E::ENTITY_NAME, id, "Entity created");

    let headers = EntityHeaders::new()
        .with_alert(E::ENTITY_NAME, EntityAction::Created, id)
        .with_location(location.as_str())
        .to_header_map();

    Ok((StatusCode::CREATED, headers, Json(created)).into_response())
}
