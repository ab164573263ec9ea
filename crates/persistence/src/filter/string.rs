//! String filter with substring matching.

use super::{FieldFilter, Filter, FilterError, FilterOperator, FilterValue};

/// Filter for text fields: equality operators plus case-sensitive substring
/// matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringFilter {
    /// Equality operators.
    pub base: Filter<String>,
    /// `contains`
    pub contains: Option<String>,
    /// `doesNotContain`, which also matches nulls.
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches values equal to `value`.
    pub fn with_equals(mut self, value: impl Into<String>) -> Self {
        self.base.equals = Some(value.into());
        self
    }

    /// Matches values different from `value`, including nulls.
    pub fn with_not_equals(mut self, value: impl Into<String>) -> Self {
        self.base.not_equals = Some(value.into());
        self
    }

    /// Matches values contained in `values`.
    pub fn with_in<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base.in_list = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Matches values not contained in `values`, including nulls.
    pub fn with_not_in<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base.not_in = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Matches non-null (`true`) or null (`false`) values.
    pub fn with_specified(mut self, specified: bool) -> Self {
        self.base.specified = Some(specified);
        self
    }

    /// Matches values containing `needle`.
    pub fn with_contains(mut self, needle: impl Into<String>) -> Self {
        self.contains = Some(needle.into());
        self
    }

    /// Matches values not containing `needle`, including nulls.
    pub fn with_does_not_contain(mut self, needle: impl Into<String>) -> Self {
        self.does_not_contain = Some(needle.into());
        self
    }
}

impl FieldFilter for StringFilter {
    fn is_empty(&self) -> bool {
        self.base.is_empty() && self.contains.is_none() && self.does_not_contain.is_none()
    }

    fn specified(&self) -> Option<bool> {
        self.base.specified
    }

    fn apply(&mut self, operator: FilterOperator, raw: &str) -> Result<(), FilterError> {
        match operator {
            FilterOperator::Contains => self.contains = Some(String::parse_value(raw)?),
            FilterOperator::DoesNotContain => {
                self.does_not_contain = Some(String::parse_value(raw)?)
            }
            other => return self.base.apply_equality(other, raw),
        }
        Ok(())
    }
}
