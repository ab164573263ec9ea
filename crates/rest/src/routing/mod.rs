//! Route configuration for the REST API.
//!
//! This module maps HTTP paths to handlers.

pub mod api_routes;

pub use api_routes::{api_routes, create_routes};
