//! Entity model.
//!
//! Three persisted record types with store-assigned `i64` identities:
//!
//! - [`Room`] owns a one-to-many relation to [`Resident`] (the resident holds
//!   the foreign key) and is referenced one-to-one by a [`Facility`].
//! - [`Resident`] belongs to at most one room.
//! - [`Facility`] references at most one room, exclusively.
//!
//! Relations embedded in another entity are carried as a [`RoomRef`], which
//! never nests residents, so serialized graphs are always finite.

mod facility;
mod resident;
mod room;

pub use facility::{Facility, FacilityPatch};
pub use resident::{Resident, ResidentPatch};
pub use room::{Room, RoomPatch, RoomRef};

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::criteria::Criteria;
use crate::error::ValidationError;

/// A persisted record type.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Partial-update payload for this entity.
    type Patch: EntityPatch;

    /// Filter aggregate for this entity.
    type Criteria: Criteria;

    /// Lowercase singular name used in messages and alerts.
    const ENTITY_NAME: &'static str;

    /// Collection segment used in URLs.
    const COLLECTION: &'static str;

    /// Returns the identity, `None` until persisted.
    fn id(&self) -> Option<i64>;

    /// Overwrites every field that is set on `patch`.
    fn merge(&mut self, patch: Self::Patch);

    /// Checks required fields.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Partial-update payload: every field optional, absent fields untouched.
pub trait EntityPatch: Debug + DeserializeOwned + Send + Sync + 'static {
    /// Returns the identity carried by the patch body.
    fn id(&self) -> Option<i64>;
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: field.to_string(),
        });
    }
    Ok(())
}
