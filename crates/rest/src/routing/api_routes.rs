//! Route configuration for the entity API.

use axum::{Router, routing::get};
use roomkeeper_persistence::model::{Entity, Facility, Resident, Room};
use roomkeeper_persistence::{Backend, FacilityStore, StoreFor};

use crate::handlers;
use crate::state::AppState;

/// Creates every API route.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Per collection (`rooms`, `residents`, `facilities`)
/// - `GET /api/{c}` - List by criteria
/// - `POST /api/{c}` - Create
/// - `GET /api/{c}/count` - Count by criteria
/// - `GET /api/{c}/{id}` - Read
/// - `PUT /api/{c}/{id}` - Update
/// - `PATCH /api/{c}/{id}` - Partial update
/// - `DELETE /api/{c}/{id}` - Delete
///
/// Any other method on a known path answers `405 Method Not Allowed`.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: FacilityStore,
{
    api_routes::<S>().with_state(state)
}

/// Creates every API route without binding state.
pub fn api_routes<S>() -> Router<AppState<S>>
where
    S: FacilityStore,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .merge(entity_routes::<Room, S>())
        .merge(entity_routes::<Resident, S>())
        .merge(entity_routes::<Facility, S>())
}

/// Creates the collection routes for one entity type.
pub fn entity_routes<E, S>() -> Router<AppState<S>>
where
    E: Entity,
    S: Backend + StoreFor<E> + 'static,
{
    let collection = format!("/api/{}", E::COLLECTION);

    Router::new()
        .route(
            &collection,
            get(handlers::list_handler::<E, S>).post(handlers::create_handler::<E, S>),
        )
        .route(
            &format!("{}/count", collection),
            get(handlers::count_handler::<E, S>),
        )
        .route(
            &format!("{}/{{id}}", collection),
            get(handlers::read_handler::<E, S>)
                .put(handlers::update_handler::<E, S>)
                .patch(handlers::partial_update_handler::<E, S>)
                .delete(handlers::delete_handler::<E, S>),
        )
}
