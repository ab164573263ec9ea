//! Typed filter primitives.
//!
//! A filter describes the comparisons to apply to a single field. Every
//! operation is optional; an empty filter imposes no constraint. There are
//! three families:
//!
//! | Filter | Operators |
//! |--------|-----------|
//! | [`Filter<T>`] / [`BooleanFilter`] | `equals`, `notEquals`, `in`, `notIn`, `specified` |
//! | [`RangeFilter<T>`] | the above plus `greaterThan`, `greaterThanOrEqual`, `lessThan`, `lessThanOrEqual` |
//! | [`StringFilter`] | the above equality set plus `contains`, `doesNotContain` |
//!
//! Filters are populated either programmatically or from raw request values
//! through [`FieldFilter::apply`].

mod range;
mod string;

pub use range::{DoubleFilter, FloatFilter, IntegerFilter, LongFilter, RangeFilter};
pub use string::StringFilter;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The comparison operators a filter parameter can name.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    In,
    NotIn,
    Specified,
    Contains,
    DoesNotContain,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl FilterOperator {
    /// Returns the parameter suffix for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "notEquals",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "notIn",
            FilterOperator::Specified => "specified",
            FilterOperator::Contains => "contains",
            FilterOperator::DoesNotContain => "doesNotContain",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::LessThanOrEqual => "lessThanOrEqual",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(FilterOperator::Equals),
            "notEquals" => Ok(FilterOperator::NotEquals),
            "in" => Ok(FilterOperator::In),
            "notIn" => Ok(FilterOperator::NotIn),
            "specified" => Ok(FilterOperator::Specified),
            "contains" => Ok(FilterOperator::Contains),
            "doesNotContain" => Ok(FilterOperator::DoesNotContain),
            "greaterThan" => Ok(FilterOperator::GreaterThan),
            "greaterThanOrEqual" => Ok(FilterOperator::GreaterThanOrEqual),
            "lessThan" => Ok(FilterOperator::LessThan),
            "lessThanOrEqual" => Ok(FilterOperator::LessThanOrEqual),
            other => Err(FilterError::UnknownOperator {
                operator: other.to_string(),
            }),
        }
    }
}

/// Errors raised while populating a filter from raw values.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown filter operator '{operator}'")]
    UnknownOperator { operator: String },

    #[error("operator '{operator}' is not supported by this filter")]
    UnsupportedOperator { operator: FilterOperator },

    #[error("cannot parse '{value}': {message}")]
    InvalidValue { value: String, message: String },
}

/// A value type that filters can compare against.
pub trait FilterValue: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Parses a single raw request value.
    fn parse_value(raw: &str) -> Result<Self, FilterError>;
}

macro_rules! impl_filter_value {
    ($($ty:ty),*) => {
        $(
            impl FilterValue for $ty {
                fn parse_value(raw: &str) -> Result<Self, FilterError> {
                    raw.trim().parse::<$ty>().map_err(|e| FilterError::InvalidValue {
                        value: raw.to_string(),
                        message: e.to_string(),
                    })
                }
            }
        )*
    };
}

impl_filter_value!(i32, i64, f32, f64, bool);

impl FilterValue for String {
    fn parse_value(raw: &str) -> Result<Self, FilterError> {
        Ok(raw.to_string())
    }
}

/// Parses a comma-separated list of values.
pub(crate) fn parse_list<T: FilterValue>(raw: &str) -> Result<Vec<T>, FilterError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(T::parse_value).collect()
}

/// Capabilities shared by every filter primitive.
pub trait FieldFilter: Clone + fmt::Debug + Default + Send + Sync {
    /// Returns true when no operation is set.
    fn is_empty(&self) -> bool;

    /// Returns the `specified` null-check, if set.
    fn specified(&self) -> Option<bool>;

    /// Sets one operation from a raw request value.
    ///
    /// `in` and `notIn` accept comma-separated values and accumulate across
    /// repeated calls; the other operators overwrite.
    fn apply(&mut self, operator: FilterOperator, raw: &str) -> Result<(), FilterError>;
}

/// Equality filter, also the base of the range and string filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<T> {
    /// `equals`
    pub equals: Option<T>,
    /// `notEquals`
    pub not_equals: Option<T>,
    /// `in`
    pub in_list: Option<Vec<T>>,
    /// `notIn`
    pub not_in: Option<Vec<T>>,
    /// `specified`
    pub specified: Option<bool>,
}

/// Filter over nullable booleans.
pub type BooleanFilter = Filter<bool>;

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_list: None,
            not_in: None,
            specified: None,
        }
    }
}

impl<T: FilterValue> Filter<T> {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches values equal to `value`.
    pub fn with_equals(mut self, value: T) -> Self {
        self.equals = Some(value);
        self
    }

    /// Matches values different from `value`, including nulls.
    pub fn with_not_equals(mut self, value: T) -> Self {
        self.not_equals = Some(value);
        self
    }

    /// Matches values contained in `values`.
    pub fn with_in(mut self, values: Vec<T>) -> Self {
        self.in_list = Some(values);
        self
    }

    /// Matches values not contained in `values`, including nulls.
    pub fn with_not_in(mut self, values: Vec<T>) -> Self {
        self.not_in = Some(values);
        self
    }

    /// Matches non-null (`true`) or null (`false`) values.
    pub fn with_specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    pub(crate) fn apply_equality(
        &mut self,
        operator: FilterOperator,
        raw: &str,
    ) -> Result<(), FilterError> {
        match operator {
            FilterOperator::Equals => self.equals = Some(T::parse_value(raw)?),
            FilterOperator::NotEquals => self.not_equals = Some(T::parse_value(raw)?),
            FilterOperator::In => {
                let values = parse_list(raw)?;
                self.in_list.get_or_insert_with(Vec::new).extend(values);
            }
            FilterOperator::NotIn => {
                let values = parse_list(raw)?;
                self.not_in.get_or_insert_with(Vec::new).extend(values);
            }
            FilterOperator::Specified => self.specified = Some(bool::parse_value(raw)?),
            other => return Err(FilterError::UnsupportedOperator { operator: other }),
        }
        Ok(())
    }
}

impl<T: FilterValue> FieldFilter for Filter<T> {
    fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.in_list.is_none()
            && self.not_in.is_none()
            && self.specified.is_none()
    }

    fn specified(&self) -> Option<bool> {
        self.specified
    }

    fn apply(&mut self, operator: FilterOperator, raw: &str) -> Result<(), FilterError> {
        self.apply_equality(operator, raw)
    }
}
