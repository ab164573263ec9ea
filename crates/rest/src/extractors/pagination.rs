//! Paging and sorting extractor.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use roomkeeper_persistence::{PageRequest, SortDirective};

use crate::error::{RestError, RestResult};

/// Axum extractor for `page`, `size` and `sort` parameters.
///
/// `sort` may be repeated; each value is `prop[,prop...][,asc|desc]`.
/// A list is paged only when `page` or `size` is present.
///
/// # Example
///
/// ```rust,ignore
/// use roomkeeper_rest::extractors::ListParams;
///
/// async fn list_handler(params: ListParams) {
///     let page = params.page_request(20, 1000)?;
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    page: Option<u32>,
    size: Option<u32>,
    sort: Vec<SortDirective>,
}

impl ListParams {
    /// Creates list parameters from already parsed values.
    pub fn new(page: Option<u32>, size: Option<u32>, sort: Vec<SortDirective>) -> Self {
        Self { page, size, sort }
    }

    /// Returns the sort directives in request order.
    pub fn sort(&self) -> &[SortDirective] {
        &self.sort
    }

    /// Returns true if the request asked for a page.
    pub fn is_paged(&self) -> bool {
        self.page.is_some() || self.size.is_some()
    }

    /// Resolves the page request, if any.
    ///
    /// A missing `page` means the first page; a missing `size` means
    /// `default_size`. Sizes above `max_size` are clamped.
    pub fn page_request(
        &self,
        default_size: u32,
        max_size: u32,
    ) -> RestResult<Option<PageRequest>> {
        if !self.is_paged() {
            return Ok(None);
        }
        let size = self.size.unwrap_or(default_size).min(max_size);
        let request = PageRequest::new(self.page.unwrap_or(0), size)
            .map_err(RestError::from)?;
        Ok(Some(request.with_sort(self.sort.clone())))
    }
}

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: format!("Invalid query string: {}", e),
            })?;

        let mut params = ListParams::default();
        for (key, value) in &pairs {
            match key.as_str() {
                "page" => params.page = Some(parse_number(key, value)?),
                "size" => params.size = Some(parse_number(key, value)?),
                "sort" => params.sort.extend(SortDirective::parse_param(value)),
                _ => {}
            }
        }
        Ok(params)
    }
}

fn parse_number(key: &str, value: &str) -> RestResult<u32> {
    value.trim().parse().map_err(|_| RestError::BadRequest {
        message: format!("Invalid {} parameter: '{}'", key, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use roomkeeper_persistence::SortDirection;

    async fn extract(uri: &str) -> RestResult<ListParams> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ListParams::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_unpaged_by_default() {
        let params = extract("/api/rooms?floor.equals=1").await.unwrap();
        assert!(!params.is_paged());
        assert_eq!(params.page_request(20, 1000).unwrap(), None);
    }

    #[tokio::test]
    async fn test_page_without_size_uses_default() {
        let params = extract("/api/rooms?page=2").await.unwrap();
        let request = params.page_request(20, 1000).unwrap().unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 20);
    }

    #[tokio::test]
    async fn test_size_clamped_to_max() {
        let params = extract("/api/rooms?size=5000").await.unwrap();
        let request = params.page_request(20, 100).unwrap().unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 100);
    }

    #[tokio::test]
    async fn test_zero_size_rejected() {
        let params = extract("/api/rooms?size=0").await.unwrap();
        assert!(matches!(
            params.page_request(20, 100),
            Err(RestError::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_repeated_sort() {
        let params = extract("/api/rooms?sort=floor,desc&sort=roomno").await.unwrap();
        assert_eq!(params.sort().len(), 2);
        assert_eq!(params.sort()[0].direction, SortDirection::Descending);
        assert_eq!(params.sort()[1].property, "roomno");
        assert_eq!(params.sort()[1].direction, SortDirection::Ascending);
    }

    #[tokio::test]
    async fn test_invalid_page_rejected() {
        assert!(extract("/api/rooms?page=first").await.is_err());
    }
}
