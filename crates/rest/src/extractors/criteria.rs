//! Criteria extractor.
//!
//! Parses `field.operator=value` query parameters into an entity's criteria
//! aggregate.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use roomkeeper_persistence::criteria::Criteria;

use crate::error::RestError;

/// Axum extractor for an entity's filter criteria.
///
/// Repeated keys are all applied, so `id.in=1&id.in=2` accumulates both
/// values. Non-filter parameters such as `page` or `sort` are ignored.
///
/// # Example
///
/// ```rust,ignore
/// use roomkeeper_persistence::criteria::RoomCriteria;
/// use roomkeeper_rest::extractors::CriteriaQuery;
///
/// async fn list_rooms(CriteriaQuery(criteria): CriteriaQuery<RoomCriteria>) {
///     println!("{:?}", criteria.floor);
/// }
/// ```
#[derive(Debug)]
pub struct CriteriaQuery<C>(pub C);

impl<C> CriteriaQuery<C> {
    /// Consumes the extractor and returns the criteria.
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<S, C> FromRequestParts<S> for CriteriaQuery<C>
where
    S: Send + Sync,
    C: Criteria,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: format!("Invalid query string: {}", e),
            })?;

        let criteria = C::from_params(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        Ok(CriteriaQuery(criteria))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use roomkeeper_persistence::criteria::{FacilityCriteria, RoomCriteria};

    async fn extract<C: Criteria>(uri: &str) -> Result<C, RestError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        CriteriaQuery::<C>::from_request_parts(&mut parts, &())
            .await
            .map(CriteriaQuery::into_inner)
    }

    #[tokio::test]
    async fn test_repeated_keys_accumulate() {
        let criteria: RoomCriteria = extract("/api/rooms?id.in=1&id.in=2,3").await.unwrap();
        assert_eq!(criteria.id.unwrap().base.in_list, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_paging_params_ignored() {
        let criteria: RoomCriteria = extract("/api/rooms?page=1&size=5&sort=floor,desc")
            .await
            .unwrap();
        assert!(criteria.floor.is_none());
    }

    #[tokio::test]
    async fn test_distinct_and_relation_filter() {
        let criteria: FacilityCriteria = extract("/api/facilities?roomId.equals=4&distinct=true")
            .await
            .unwrap();
        assert_eq!(criteria.room_id.unwrap().base.equals, Some(4));
        assert_eq!(criteria.distinct, Some(true));
    }

    #[tokio::test]
    async fn test_bad_value_is_bad_request() {
        let err = extract::<RoomCriteria>("/api/rooms?floor.greaterThan=high")
            .await
            .unwrap_err();
        assert!(matches!(err, RestError::BadRequest { .. }));
    }
}
