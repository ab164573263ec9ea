//! JSON body extractor.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;

use crate::error::RestError;

/// Axum extractor for an entity or patch in the request body.
///
/// Accepts `application/json` and any `application/*+json` type such as
/// `application/merge-patch+json`. A missing `Content-Type` is read as
/// JSON.
///
/// # Example
///
/// ```rust,ignore
/// use roomkeeper_persistence::model::Room;
/// use roomkeeper_rest::extractors::EntityBody;
///
/// async fn create_room(EntityBody(room): EntityBody<Room>) {
///     println!("{}", room.roomno);
/// }
/// ```
#[derive(Debug)]
pub struct EntityBody<T>(pub T);

impl<T> EntityBody<T> {
    /// Consumes the extractor and returns the body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Returns true if `content_type` names a JSON media type.
pub fn is_json_content_type(content_type: &str) -> bool {
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };
    mime.type_() == mime::APPLICATION
        && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
}

impl<S, T> FromRequest<S> for EntityBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Owned before `req` moves into the body extractor.
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();

        if !is_json_content_type(&content_type) {
            return Err(RestError::UnsupportedMediaType { content_type });
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: format!("Could not read request body: {}", e),
            })?;

        let value = serde_json::from_slice(&bytes)?;
        Ok(EntityBody(value))
    }
}
