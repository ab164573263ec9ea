//! Response building for the REST API.
//!
//! - [`headers`] - alert, Location, X-Total-Count and Link headers

pub mod headers;

pub use headers::{EntityAction, EntityHeaders};
