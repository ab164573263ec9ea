use super::{Criteria, apply_to};
use crate::filter::{BooleanFilter, FilterError, FilterOperator, LongFilter};

/// Filters over [`Facility`](crate::model::Facility).
///
/// Parameter names: `id`, `aC`, `parking`, `wifi`, `roomId`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityCriteria {
    pub id: Option<LongFilter>,
    pub a_c: Option<BooleanFilter>,
    pub parking: Option<BooleanFilter>,
    pub wifi: Option<BooleanFilter>,
    pub room_id: Option<LongFilter>,
    pub distinct: Option<bool>,
}

impl Criteria for FacilityCriteria {
    fn distinct(&self) -> Option<bool> {
        self.distinct
    }

    fn set_distinct(&mut self, distinct: bool) {
        self.distinct = Some(distinct);
    }

    fn apply_filter(
        &mut self,
        field: &str,
        operator: FilterOperator,
        raw: &str,
    ) -> Result<bool, FilterError> {
        match field {
            "id" => apply_to(&mut self.id, operator, raw),
            "aC" => apply_to(&mut self.a_c, operator, raw),
            "parking" => apply_to(&mut self.parking, operator, raw),
            "wifi" => apply_to(&mut self.wifi, operator, raw),
            "roomId" => apply_to(&mut self.room_id, operator, raw),
            _ => Ok(false),
        }
    }
}
