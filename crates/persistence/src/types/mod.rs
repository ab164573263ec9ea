//! Shared query types.
//!
//! - [`SortDirective`], [`SortDirection`]: explicit ordering
//! - [`PageRequest`]: zero-based offset pagination
//! - [`Page`], [`PageInfo`]: one page of results plus totals

mod pagination;

pub use pagination::{Page, PageInfo, PageRequest, SortDirection, SortDirective};
