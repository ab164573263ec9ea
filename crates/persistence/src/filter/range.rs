//! Range filter for ordered scalar fields.

use super::{FieldFilter, Filter, FilterError, FilterOperator, FilterValue};

/// Filter for ordered values: equality operators plus bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter<T> {
    /// Equality operators.
    pub base: Filter<T>,
    /// `greaterThan`
    pub greater_than: Option<T>,
    /// `greaterThanOrEqual`
    pub greater_than_or_equal: Option<T>,
    /// `lessThan`
    pub less_than: Option<T>,
    /// `lessThanOrEqual`
    pub less_than_or_equal: Option<T>,
}

/// Filter over `i32` fields.
pub type IntegerFilter = RangeFilter<i32>;
/// Filter over `i64` fields and identities.
pub type LongFilter = RangeFilter<i64>;
/// Filter over `f32` fields.
pub type FloatFilter = RangeFilter<f32>;
/// Filter over `f64` fields.
pub type DoubleFilter = RangeFilter<f64>;

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            base: Filter::default(),
            greater_than: None,
            greater_than_or_equal: None,
            less_than: None,
            less_than_or_equal: None,
        }
    }
}

impl<T: FilterValue> RangeFilter<T> {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches values equal to `value`.
    pub fn with_equals(mut self, value: T) -> Self {
        self.base.equals = Some(value);
        self
    }

    /// Matches values different from `value`, including nulls.
    pub fn with_not_equals(mut self, value: T) -> Self {
        self.base.not_equals = Some(value);
        self
    }

    /// Matches values contained in `values`.
    pub fn with_in(mut self, values: Vec<T>) -> Self {
        self.base.in_list = Some(values);
        self
    }

    /// Matches values not contained in `values`, including nulls.
    pub fn with_not_in(mut self, values: Vec<T>) -> Self {
        self.base.not_in = Some(values);
        self
    }

    /// Matches non-null (`true`) or null (`false`) values.
    pub fn with_specified(mut self, specified: bool) -> Self {
        self.base.specified = Some(specified);
        self
    }

    /// Matches values strictly greater than `value`.
    pub fn with_greater_than(mut self, value: T) -> Self {
        self.greater_than = Some(value);
        self
    }

    /// Matches values greater than or equal to `value`.
    pub fn with_greater_than_or_equal(mut self, value: T) -> Self {
        self.greater_than_or_equal = Some(value);
        self
    }

    /// Matches values strictly less than `value`.
    pub fn with_less_than(mut self, value: T) -> Self {
        self.less_than = Some(value);
        self
    }

    /// Matches values less than or equal to `value`.
    pub fn with_less_than_or_equal(mut self, value: T) -> Self {
        self.less_than_or_equal = Some(value);
        self
    }
}

impl<T: FilterValue> FieldFilter for RangeFilter<T> {
    fn is_empty(&self) -> bool {
        self.base.is_empty()
            && self.greater_than.is_none()
            && self.greater_than_or_equal.is_none()
            && self.less_than.is_none()
            && self.less_than_or_equal.is_none()
    }

    fn specified(&self) -> Option<bool> {
        self.base.specified
    }

    fn apply(&mut self, operator: FilterOperator, raw: &str) -> Result<(), FilterError> {
        match operator {
            FilterOperator::GreaterThan => self.greater_than = Some(T::parse_value(raw)?),
            FilterOperator::GreaterThanOrEqual => {
                self.greater_than_or_equal = Some(T::parse_value(raw)?)
            }
            FilterOperator::LessThan => self.less_than = Some(T::parse_value(raw)?),
            FilterOperator::LessThanOrEqual => {
                self.less_than_or_equal = Some(T::parse_value(raw)?)
            }
            other => return self.base.apply_equality(other, raw),
        }
        Ok(())
    }
}
