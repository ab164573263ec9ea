use super::{Criteria, apply_to};
use crate::filter::{FilterError, FilterOperator, LongFilter, StringFilter};

/// Filters over [`Resident`](crate::model::Resident).
///
/// Parameter names: `id`, `firstname`, `lastname`, `email`, `phonenumber`,
/// `roomId`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidentCriteria {
    pub id: Option<LongFilter>,
    pub firstname: Option<StringFilter>,
    pub lastname: Option<StringFilter>,
    pub email: Option<StringFilter>,
    pub phonenumber: Option<StringFilter>,
    pub room_id: Option<LongFilter>,
    pub distinct: Option<bool>,
}

impl Criteria for ResidentCriteria {
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
            "firstname" => apply_to(&mut self.firstname, operator, raw),
            "lastname" => apply_to(&mut self.lastname, operator, raw),
            "email" => apply_to(&mut self.email, operator, raw),
            "phonenumber" => apply_to(&mut self.phonenumber, operator, raw),
            "roomId" => apply_to(&mut self.room_id, operator, raw),
            _ => Ok(false),
        }
    }
}
