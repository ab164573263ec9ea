//! Response header generation.
//!
//! Alert headers tell a client what happened to which entity:
//!
//! - `X-roomkeeperApp-alert` / `X-roomkeeperApp-params` on success
//! - `X-roomkeeperApp-error` / `X-roomkeeperApp-params` on failure
//!
//! Paged list responses also carry `X-Total-Count` and an RFC 5988 `Link`
//! header.

use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri, header};
use roomkeeper_persistence::PageInfo;
use url::Url;

/// Application name used as the alert header prefix.
pub const APP_NAME: &str = "roomkeeperApp";

/// Success alert header.
pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-roomkeeperapp-alert");

/// Failure alert header.
pub const ERROR_HEADER: HeaderName = HeaderName::from_static("x-roomkeeperapp-error");

/// Alert parameter header.
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-roomkeeperapp-params");

/// Total number of matches behind a paged response.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// What happened to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    /// The entity was created.
    Created,
    /// The entity was updated.
    Updated,
    /// The entity was deleted.
    Deleted,
}

impl EntityAction {
    fn verb(self) -> &'static str {
        match self {
            EntityAction::Created => "created",
            EntityAction::Updated => "updated",
            EntityAction::Deleted => "deleted",
        }
    }
}

/// Builder for entity response headers.
#[derive(Debug, Default)]
pub struct EntityHeaders {
    alert: Option<String>,
    params: Option<String>,
    location: Option<String>,
    total_count: Option<u64>,
    link: Option<String>,
}

impl EntityHeaders {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the success alert for `action` on the entity at `id`.
    pub fn with_alert(mut self, entity: &str, action: EntityAction, id: i64) -> Self {
        let article = if action == EntityAction::Created {
            "A new"
        } else {
            "A"
        };
        self.alert = Some(format!(
            "{} {} is {} with identifier {}",
            article,
            entity,
            action.verb(),
            id
        ));
        self.params = Some(id.to_string());
        self
    }

    /// Sets the Location URL.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the total count and the pagination links for a page.
    pub fn with_page(mut self, info: &PageInfo, link: Option<String>) -> Self {
        self.total_count = Some(info.total);
        self.link = link;
        self
    }

    /// Returns the alert message.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Returns the Location value.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Converts to an Axum HeaderMap. Values that are not valid header text
    /// are dropped.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(alert) = &self.alert {
            insert(&mut headers, ALERT_HEADER, alert);
        }
        if let Some(params) = &self.params {
            insert(&mut headers, PARAMS_HEADER, params);
        }
        if let Some(location) = &self.location {
            insert(&mut headers, header::LOCATION, location);
        }
        if let Some(total) = self.total_count {
            headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
        }
        if let Some(link) = &self.link {
            insert(&mut headers, header::LINK, link);
        }

        headers
    }
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

/// Builds the failure alert headers for `entity`.
pub fn failure_alert(entity: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ERROR_HEADER, &format!("error.{}", error_key));
    insert(&mut headers, PARAMS_HEADER, entity);
    headers
}

/// Builds the URL of the entity at `id` under `base_url`.
pub fn location_url(base_url: &str, collection: &str, id: i64) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(["api", collection, &id.to_string()]);
    Ok(url)
}

/// Builds the RFC 5988 `Link` header for a page.
///
/// The request path is appended to the path of `base_url`. Every query parameter
/// is kept except `page` and `size`, which are replaced per link. `next`
/// and `prev` appear only when such a page exists; `last` and `first`
/// always do.
pub fn pagination_link(
    base_url: &str,
    uri: &Uri,
    info: &PageInfo,
) -> Result<String, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    base.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(uri.path().split('/').filter(|s| !s.is_empty()));
    let kept: Vec<(String, String)> = url::form_urlencoded::parse(
        uri.query().unwrap_or_default().as_bytes(),
    )
    .filter(|(k, _)| k != "page" && k != "size")
    .map(|(k, v)| (k.into_owned(), v.into_owned()))
    .collect();

    let page_url = |page: u64| -> String {
        let mut url = base.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter())
            .append_pair("page", &page.to_string())
            .append_pair("size", &info.size.to_string());
        url.to_string()
    };

    let page = u64::from(info.page);
    let last = info.total_pages().saturating_sub(1);
    let mut links = Vec::with_capacity(4);
    if info.has_next {
        links.push(format!("<{}>; rel=\"next\"", page_url(page + 1)));
    }
    if info.has_previous {
        links.push(format!("<{}>; rel=\"prev\"", page_url(page - 1)));
    }
    links.push(format!("<{}>; rel=\"last\"", page_url(last)));
    links.push(format!("<{}>; rel=\"first\"", page_url(0)));

    Ok(links.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomkeeper_persistence::PageRequest;

    #[test]
    fn test_created_alert() {
        let headers = EntityHeaders::new()
            .with_alert("room", EntityAction::Created, 4)
            .to_header_map();
        assert_eq!(
            headers[ALERT_HEADER],
            "A new room is created with identifier 4"
        );
        assert_eq!(headers[PARAMS_HEADER], "4");
    }

    #[test]
    fn test_deleted_alert() {
        let headers = EntityHeaders::new().with_alert("facility", EntityAction::Deleted, 2);
        assert_eq!(
            headers.alert(),
            Some("A facility is deleted with identifier 2")
        );
    }

    #[test]
    fn test_failure_alert() {
        let headers = failure_alert("resident", "idexists");
        assert_eq!(headers[ERROR_HEADER], "error.idexists");
        assert_eq!(headers[PARAMS_HEADER], "resident");
    }

    #[test]
    fn test_location_url_keeps_base_path() {
        let url = location_url("http://localhost:8080", "rooms", 3).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/rooms/3");

        let url = location_url("https://example.com/keeper/", "residents", 7).unwrap();
        assert_eq!(url.as_str(), "https://example.com/keeper/api/residents/7");
    }

    #[test]
    fn test_pagination_link_middle_page() {
        let request = PageRequest::new(1, 2).unwrap();
        let info = PageInfo::new(&request, 5);
        let uri: Uri = "/api/rooms?floor.equals=1&page=1&size=2".parse().unwrap();

        let link = pagination_link("http://localhost:8080", &uri, &info).unwrap();
        assert!(link.contains(
            "<http://localhost:8080/api/rooms?floor.equals=1&page=2&size=2>; rel=\"next\""
        ));
        assert!(link.contains("page=0&size=2>; rel=\"prev\""));
        assert!(link.contains("page=2&size=2>; rel=\"last\""));
        assert!(link.contains("page=0&size=2>; rel=\"first\""));
    }

    #[test]
    fn test_pagination_link_single_page() {
        let request = PageRequest::new(0, 20).unwrap();
        let info = PageInfo::new(&request, 3);
        let uri: Uri = "/api/residents".parse().unwrap();

        let link = pagination_link("http://localhost:8080", &uri, &info).unwrap();
        assert!(!link.contains("rel=\"next\""));
        assert!(!link.contains("rel=\"prev\""));
        assert!(link.contains("page=0&size=20>; rel=\"last\""));
    }

    #[test]
    fn test_pagination_link_keeps_base_path() {
        let request = PageRequest::new(0, 2).unwrap();
        let info = PageInfo::new(&request, 3);
        let uri: Uri = "/api/rooms?type.equals=single&page=0&size=2".parse().unwrap();

        let link = pagination_link("https://example.com/keeper/", &uri, &info).unwrap();
        assert!(link.contains(
            "<https://example.com/keeper/api/rooms?type.equals=single&page=1&size=2>; rel=\"next\""
        ));
        assert!(link.contains("<https://example.com/keeper/api/rooms?type.equals=single&page=0&size=2>; rel=\"first\""));
    }
}
