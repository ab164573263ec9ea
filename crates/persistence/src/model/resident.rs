use serde::{Deserialize, Serialize};

use super::{Entity, EntityPatch, Room, RoomRef, require_text};
use crate::criteria::ResidentCriteria;
use crate::error::ValidationError;

/// A resident, optionally assigned to a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    /// Store-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,

    /// Contact address, required.
    #[serde(default)]
    pub email: String,

    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,

    /// The room this resident belongs to. Owns the relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomRef>,
}

impl Resident {
    /// Creates an unsaved resident.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Sets first and last name.
    pub fn with_name(mut self, firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        self.firstname = Some(firstname.into());
        self.lastname = Some(lastname.into());
        self
    }

    /// Sets the phone number.
    pub fn with_phonenumber(mut self, phonenumber: impl Into<String>) -> Self {
        self.phonenumber = Some(phonenumber.into());
        self
    }

    /// Points this resident at a room by identity.
    pub fn with_room(mut self, room_id: i64) -> Self {
        self.room = Some(RoomRef::id(room_id));
        self
    }

    /// Returns the identity of the room this resident belongs to.
    pub fn room_id(&self) -> Option<i64> {
        self.room.as_ref().and_then(|r| r.id)
    }

    /// Moves this resident into `room`, updating both sides.
    pub fn join_room(self, room: &mut Room) {
        room.add_resident(self);
    }
}

impl Entity for Resident {
    type Patch = ResidentPatch;
    type Criteria = ResidentCriteria;

    const ENTITY_NAME: &'static str = "resident";
    const COLLECTION: &'static str = "residents";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn merge(&mut self, patch: ResidentPatch) {
        if let Some(firstname) = patch.firstname {
            self.firstname = Some(firstname);
        }
        if let Some(lastname) = patch.lastname {
            self.lastname = Some(lastname);
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phonenumber) = patch.phonenumber {
            self.phonenumber = Some(phonenumber);
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("email", &self.email)
    }
}

/// Partial update for a [`Resident`]. The room relation is not merged.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResidentPatch {
    pub id: Option<i64>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phonenumber: Option<String>,
}

impl EntityPatch for ResidentPatch {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_room_updates_both_sides() {
        let mut room = Room::new("101");
        room.id = Some(2);
        Resident::new("a@x.com").join_room(&mut room);
        assert_eq!(room.residents().len(), 1);
        assert_eq!(room.residents()[0].room_id(), Some(2));
    }

    #[test]
    fn test_deserialize_room_reference() {
        let resident: Resident = serde_json::from_value(json!({
            "email": "a@x.com",
            "room": {"id": 4}
        }))
        .unwrap();
        assert_eq!(resident.room_id(), Some(4));
    }

    #[test]
    fn test_missing_email_fails_validation() {
        let resident: Resident = serde_json::from_value(json!({"firstname": "Ann"})).unwrap();
        let err = resident.validate().unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequiredField { ref field } if field == "email"));
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut resident = Resident::new("a@x.com").with_name("Ann", "Lee");
        let before = resident.clone();
        resident.merge(ResidentPatch::default());
        assert_eq!(resident, before);
    }

    #[test]
    fn test_patch_single_field() {
        let mut resident = Resident::new("a@x.com").with_phonenumber("555");
        resident.merge(ResidentPatch {
            lastname: Some("Lee".into()),
            ..ResidentPatch::default()
        });
        assert_eq!(resident.lastname.as_deref(), Some("Lee"));
        assert_eq!(resident.phonenumber.as_deref(), Some("555"));
        assert_eq!(resident.email, "a@x.com");
    }
}
