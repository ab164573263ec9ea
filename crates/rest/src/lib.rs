//! # roomkeeper-rest - Facility Management REST API
//!
//! HTTP surface for rooms, residents and facilities: create, update,
//! partial update, read and delete by identity, plus list and count by
//! dynamic filter criteria.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roomkeeper_persistence::backends::sqlite::SqliteBackend;
//! use roomkeeper_rest::{ServerConfig, create_app_with_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = SqliteBackend::open("roomkeeper.db")?;
//!     backend.init_schema()?;
//!
//!     let config = ServerConfig::default();
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     let app = create_app_with_config(backend, config);
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! Collections are `rooms`, `residents` and `facilities`.
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | list | GET | `/api/{c}?field.op=value&page=&size=&sort=` |
//! | count | GET | `/api/{c}/count?field.op=value` |
//! | create | POST | `/api/{c}` |
//! | read | GET | `/api/{c}/{id}` |
//! | update | PUT | `/api/{c}/{id}` |
//! | partial update | PATCH | `/api/{c}/{id}` |
//! | delete | DELETE | `/api/{c}/{id}` |
//! | health | GET | `/health`, `/_liveness`, `/_readiness` |
//!
//! ## Filter Parameters
//!
//! A filter parameter is `field.operator=value`. Operators are `equals`,
//! `notEquals`, `in`, `notIn`, `specified`, `contains`, `doesNotContain`,
//! `greaterThan`, `greaterThanOrEqual`, `lessThan` and `lessThanOrEqual`,
//! depending on the field type. `in` and `notIn` take comma-separated
//! values. `distinct=true` collapses duplicate rows from relation joins.
//!
//! ## Error Handling
//!
//! Errors are `application/problem+json` bodies; see [`error`].
//!
//! ## Architecture
//!
//! - [`error`] - Error types and problem responses
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers, generic over the entity
//! - [`extractors`] - Criteria, paging and body extractors
//! - [`responses`] - Alert, Location and pagination headers
//! - [`routing`] - Route configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, http::StatusCode};
use roomkeeper_persistence::FacilityStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: FacilityStore,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Sets up every route plus tracing, timeout, body limit, and the optional
/// CORS and request-id layers.
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: FacilityStore,
{
    info!("Creating REST API server with backend: {}", storage.name());

    let state = AppState::new(Arc::new(storage), config.clone());
    let router = routing::create_routes(state).layer(DefaultBodyLimit::max(config.max_body_size));

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    let router = router.layer(service_builder);

    // Outermost, so the id is set before tracing sees the request.
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    // Alert and paging headers must be readable by browser clients.
    cors.expose_headers([
        responses::headers::ALERT_HEADER,
        responses::headers::ERROR_HEADER,
        responses::headers::PARAMS_HEADER,
        responses::headers::TOTAL_COUNT_HEADER,
        axum::http::header::LINK,
        axum::http::header::LOCATION,
    ])
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over `level`. Call once at startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "roomkeeper_rest={level},roomkeeper_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
