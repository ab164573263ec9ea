//! Range filter SQL handler.

use crate::filter::RangeFilter;

use super::super::{SqlFragment, SqlParam};
use super::ConditionBuilder;

/// Handles SQL generation for range filters over ordered columns.
pub struct RangeHandler;

impl RangeHandler {
    /// Builds the conditions for `filter` on `column`.
    ///
    /// Placeholders start at `param_offset + 1`.
    pub fn build_sql<T>(column: &str, filter: &RangeFilter<T>, param_offset: usize) -> SqlFragment
    where
        T: Clone + Into<SqlParam>,
    {
        let mut builder = ConditionBuilder::new(column, param_offset);
        builder.equality(&filter.base);

        if let Some(value) = &filter.greater_than {
            builder.compare(">", value.clone());
        }
        if let Some(value) = &filter.greater_than_or_equal {
            builder.compare(">=", value.clone());
        }
        if let Some(value) = &filter.less_than {
            builder.compare("<", value.clone());
        }
        if let Some(value) = &filter.less_than_or_equal {
            builder.compare("<=", value.clone());
        }

        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{IntegerFilter, LongFilter};

    #[test]
    fn test_equals() {
        let frag = RangeHandler::build_sql("e.floor", &IntegerFilter::new().with_equals(1), 0);
        assert_eq!(frag.sql, "e.floor = ?1");
        assert_eq!(frag.params, vec![SqlParam::Integer(1)]);
    }

    #[test]
    fn test_not_equals_includes_null() {
        let frag = RangeHandler::build_sql("e.floor", &IntegerFilter::new().with_not_equals(1), 0);
        assert_eq!(frag.sql, "(e.floor IS NULL OR e.floor <> ?1)");
    }

    #[test]
    fn test_bounds_with_offset() {
        let filter = IntegerFilter::new()
            .with_greater_than_or_equal(1)
            .with_less_than_or_equal(3);
        let frag = RangeHandler::build_sql("e.floor", &filter, 4);
        assert_eq!(frag.sql, "e.floor >= ?5 AND e.floor <= ?6");
        assert_eq!(frag.params.len(), 2);
    }

    #[test]
    fn test_in_list() {
        let frag = RangeHandler::build_sql("e.id", &LongFilter::new().with_in(vec![1, 2, 3]), 0);
        assert_eq!(frag.sql, "e.id IN (?1, ?2, ?3)");
        assert_eq!(frag.params.len(), 3);
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        let frag = RangeHandler::build_sql("e.id", &LongFilter::new().with_in(vec![]), 0);
        assert_eq!(frag.sql, "1 = 0");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_empty_not_in_matches_everything() {
        let frag = RangeHandler::build_sql("e.id", &LongFilter::new().with_not_in(vec![]), 0);
        assert!(frag.is_empty());
    }

    #[test]
    fn test_not_in_includes_null() {
        let frag = RangeHandler::build_sql("room.id", &LongFilter::new().with_not_in(vec![4]), 2);
        assert_eq!(frag.sql, "(room.id IS NULL OR room.id NOT IN (?3))");
    }

    #[test]
    fn test_specified() {
        let frag = RangeHandler::build_sql("e.floor", &IntegerFilter::new().with_specified(false), 0);
        assert_eq!(frag.sql, "e.floor IS NULL");
        let frag = RangeHandler::build_sql("e.floor", &IntegerFilter::new().with_specified(true), 0);
        assert_eq!(frag.sql, "e.floor IS NOT NULL");
    }
}
