//! Boolean filter SQL handler.

use crate::filter::BooleanFilter;

use super::super::SqlFragment;
use super::ConditionBuilder;

/// Handles SQL generation for boolean filters over `0`/`1` columns.
pub struct BooleanHandler;

impl BooleanHandler {
    /// Builds the conditions for `filter` on `column`.
    pub fn build_sql(column: &str, filter: &BooleanFilter, param_offset: usize) -> SqlFragment {
        let mut builder = ConditionBuilder::new(column, param_offset);
        builder.equality(filter);
        builder.finish()
    }
}
