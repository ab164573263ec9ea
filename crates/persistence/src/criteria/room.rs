use super::{Criteria, apply_to};
use crate::filter::{FilterError, FilterOperator, IntegerFilter, LongFilter, StringFilter};

/// Filters over [`Room`](crate::model::Room).
///
/// Parameter names: `id`, `roomno`, `floor`, `type`, `residentId`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomCriteria {
    pub id: Option<LongFilter>,
    pub roomno: Option<StringFilter>,
    pub floor: Option<IntegerFilter>,
    pub room_type: Option<StringFilter>,
    /// Identity of any resident of the room.
    pub resident_id: Option<LongFilter>,
    pub distinct: Option<bool>,
}

impl Criteria for RoomCriteria {
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
            "roomno" => apply_to(&mut self.roomno, operator, raw),
            "floor" => apply_to(&mut self.floor, operator, raw),
            "type" => apply_to(&mut self.room_type, operator, raw),
            "residentId" => apply_to(&mut self.resident_id, operator, raw),
            _ => Ok(false),
        }
    }
}
