use serde::{Deserialize, Serialize};

use super::{Entity, EntityPatch, RoomRef};
use crate::criteria::FacilityCriteria;
use crate::error::ValidationError;

/// Amenities of a room. Each flag is tri-state: true, false or unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Store-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Air conditioning.
    #[serde(rename = "aC", default, skip_serializing_if = "Option::is_none")]
    pub a_c: Option<bool>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<bool>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi: Option<bool>,

    /// The room these amenities belong to. At most one facility per room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomRef>,
}

impl Facility {
    /// Creates an unsaved facility with every flag unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the air conditioning flag.
    pub fn with_a_c(mut self, value: bool) -> Self {
        self.a_c = Some(value);
        self
    }

    /// Sets the parking flag.
    pub fn with_parking(mut self, value: bool) -> Self {
        self.parking = Some(value);
        self
    }

    /// Sets the wifi flag.
    pub fn with_wifi(mut self, value: bool) -> Self {
        self.wifi = Some(value);
        self
    }

    /// Links this facility to a room by identity.
    pub fn with_room(mut self, room_id: i64) -> Self {
        self.room = Some(RoomRef::id(room_id));
        self
    }

    /// Returns the identity of the linked room.
    pub fn room_id(&self) -> Option<i64> {
        self.room.as_ref().and_then(|r| r.id)
    }
}

impl Entity for Facility {
    type Patch = FacilityPatch;
    type Criteria = FacilityCriteria;

    const ENTITY_NAME: &'static str = "facility";
    const COLLECTION: &'static str = "facilities";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn merge(&mut self, patch: FacilityPatch) {
        if let Some(a_c) = patch.a_c {
            self.a_c = Some(a_c);
        }
        if let Some(parking) = patch.parking {
            self.parking = Some(parking);
        }
        if let Some(wifi) = patch.wifi {
            self.wifi = Some(wifi);
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Partial update for a [`Facility`]. The room relation is not merged.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FacilityPatch {
    pub id: Option<i64>,
    #[serde(rename = "aC")]
    pub a_c: Option<bool>,
    pub parking: Option<bool>,
    pub wifi: Option<bool>,
}

impl EntityPatch for FacilityPatch {
    fn id(&self) -> Option<i64> {
        self.id
    }
}
