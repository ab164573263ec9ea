//! String filter SQL handler.

use crate::filter::StringFilter;

use super::super::SqlFragment;
use super::ConditionBuilder;

/// Handles SQL generation for string filters.
///
/// Substring matching uses `instr`, which is case-sensitive, rather than
/// `LIKE`, which SQLite folds for ASCII.
pub struct StringHandler;

impl StringHandler {
    /// Builds the conditions for `filter` on `column`.
    pub fn build_sql(column: &str, filter: &StringFilter, param_offset: usize) -> SqlFragment {
        let mut builder = ConditionBuilder::new(column, param_offset);
        builder.equality(&filter.base);

        if let Some(needle) = &filter.contains {
            let placeholder = builder.bind(needle.clone());
            let condition = format!("instr({}, {}) > 0", builder.column(), placeholder);
            builder.push(condition);
        }

        if let Some(needle) = &filter.does_not_contain {
            let placeholder = builder.bind(needle.clone());
            let condition = format!(
                "({col} IS NULL OR instr({col}, {placeholder}) = 0)",
                col = builder.column()
            );
            builder.push(condition);
        }

        builder.finish()
    }
}
