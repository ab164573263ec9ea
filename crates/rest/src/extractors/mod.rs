//! Axum extractors for entity requests.
//!
//! - [`CriteriaQuery`] - filter criteria from `field.operator=value` parameters
//! - [`ListParams`] - `page`, `size` and `sort`
//! - [`EntityBody`] - a JSON entity or patch body

mod criteria;
mod entity_body;
mod pagination;

pub use criteria::CriteriaQuery;
pub use entity_body::{EntityBody, is_json_content_type};
pub use pagination::ListParams;
