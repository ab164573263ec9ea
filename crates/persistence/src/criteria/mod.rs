//! Per-entity filter aggregates.
//!
//! A criteria object holds one optional filter per queryable field, an
//! identity filter for every relation and a `distinct` flag. Request
//! parameters of the form `field.operator=value` map onto it one to one:
//!
//! ```
//! use roomkeeper_persistence::criteria::{Criteria, RoomCriteria};
//!
//! let criteria = RoomCriteria::from_params([
//!     ("floor.lessThan", "2"),
//!     ("roomno.in", "101,102"),
//!     ("distinct", "true"),
//! ])
//! .unwrap();
//! assert_eq!(criteria.floor.unwrap().less_than, Some(2));
//! assert_eq!(criteria.distinct, Some(true));
//! ```

mod facility;
mod resident;
mod room;

pub use facility::FacilityCriteria;
pub use resident::ResidentCriteria;
pub use room::RoomCriteria;

use std::fmt::Debug;

use crate::error::ValidationError;
use crate::filter::{FieldFilter, FilterError, FilterOperator, FilterValue};

/// The parameter name that toggles duplicate collapsing.
pub const DISTINCT_PARAM: &str = "distinct";

/// A filter aggregate for one entity.
pub trait Criteria: Clone + Default + Debug + Send + Sync + 'static {
    /// Returns the `distinct` flag, if set.
    fn distinct(&self) -> Option<bool>;

    /// Sets the `distinct` flag.
    fn set_distinct(&mut self, distinct: bool);

    /// Applies one operator to the named field.
    ///
    /// Returns `Ok(false)` when the entity has no such field.
    fn apply_filter(
        &mut self,
        field: &str,
        operator: FilterOperator,
        raw: &str,
    ) -> Result<bool, FilterError>;

    /// Builds a criteria object from flat request parameters.
    ///
    /// Parameters without a `.` (other than `distinct`), unknown fields and
    /// unknown operators are skipped. Unparseable values and operators the
    /// field type does not support are rejected.
    fn from_params<'a, I>(params: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut criteria = Self::default();
        for (key, raw) in params {
            if key == DISTINCT_PARAM {
                let distinct = bool::parse_value(raw).map_err(|e| invalid(key, e))?;
                criteria.set_distinct(distinct);
                continue;
            }
            let Some((field, operator)) = key.rsplit_once('.') else {
                continue;
            };
            let Ok(operator) = operator.parse::<FilterOperator>() else {
                tracing::debug!(parameter = key, "Ignoring unknown filter operator");
                continue;
            };
            if !criteria
                .apply_filter(field, operator, raw)
                .map_err(|e| invalid(key, e))?
            {
                tracing::debug!(parameter = key, "Ignoring filter on unknown field");
            }
        }
        Ok(criteria)
    }
}

fn invalid(parameter: &str, err: FilterError) -> ValidationError {
    ValidationError::InvalidSearchParameter {
        parameter: parameter.to_string(),
        message: err.to_string(),
    }
}

/// Applies `operator` to an optional filter slot, creating the filter on
/// first use.
pub(crate) fn apply_to<F: FieldFilter>(
    slot: &mut Option<F>,
    operator: FilterOperator,
    raw: &str,
) -> Result<bool, FilterError> {
    let mut filter = slot.clone().unwrap_or_default();
    filter.apply(operator, raw)?;
    *slot = Some(filter);
    Ok(true)
}
