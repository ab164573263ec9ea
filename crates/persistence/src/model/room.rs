use serde::{Deserialize, Serialize, Serializer};

use super::{Entity, EntityPatch, Resident, require_text};
use crate::criteria::RoomCriteria;
use crate::error::ValidationError;

/// A room with its residents.
///
/// The resident set is the non-owning side of the relation: it is populated
/// on load and ignored on input. Use [`Room::add_resident`],
/// [`Room::remove_resident`] and [`Room::set_residents`] to change it so each
/// resident's back-reference stays in step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Store-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Room number, unique across rooms.
    #[serde(default)]
    pub roomno: String,

    /// Floor the room is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,

    /// Free-form room type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,

    #[serde(skip_deserializing, serialize_with = "serialize_residents")]
    residents: Vec<Resident>,
}

fn serialize_residents<S: Serializer>(residents: &[Resident], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(residents.iter().map(|resident| Resident {
        room: None,
        ..resident.clone()
    }))
}

impl Room {
    /// Creates an unsaved room.
    pub fn new(roomno: impl Into<String>) -> Self {
        Self {
            roomno: roomno.into(),
            ..Self::default()
        }
    }

    /// Sets the floor.
    pub fn with_floor(mut self, floor: i32) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Sets the room type.
    pub fn with_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    /// Returns the residents of this room.
    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    /// Adds a resident and points its room reference at this room.
    pub fn add_resident(&mut self, mut resident: Resident) -> &mut Self {
        resident.room = Some(RoomRef::from(&*self));
        self.residents.push(resident);
        self
    }

    /// Removes the resident with the given identity and clears its room
    /// reference.
    pub fn remove_resident(&mut self, resident_id: i64) -> Option<Resident> {
        let index = self
            .residents
            .iter()
            .position(|r| r.id == Some(resident_id))?;
        let mut resident = self.residents.remove(index);
        resident.room = None;
        Some(resident)
    }

    /// Replaces the resident set, detaching the previous residents.
    pub fn set_residents(&mut self, residents: Vec<Resident>) -> Vec<Resident> {
        let previous = std::mem::take(&mut self.residents)
            .into_iter()
            .map(|mut r| {
                r.room = None;
                r
            })
            .collect();
        for resident in residents {
            self.add_resident(resident);
        }
        previous
    }

    /// Replaces the resident set with rows that already reference this room.
    pub(crate) fn load_residents(&mut self, residents: Vec<Resident>) {
        self.residents.clear();
        for resident in residents {
            self.add_resident(resident);
        }
    }
}

impl Entity for Room {
    type Patch = RoomPatch;
    type Criteria = RoomCriteria;

    const ENTITY_NAME: &'static str = "room";
    const COLLECTION: &'static str = "rooms";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn merge(&mut self, patch: RoomPatch) {
        if let Some(roomno) = patch.roomno {
            self.roomno = roomno;
        }
        if let Some(floor) = patch.floor {
            self.floor = Some(floor);
        }
        if let Some(room_type) = patch.room_type {
            self.room_type = Some(room_type);
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("roomno", &self.roomno)
    }
}

/// Embedded reference to a room, without its residents.
///
/// On input only `id` is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomRef {
    /// Identity of the referenced room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Room number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roomno: Option<String>,

    /// Floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,

    /// Room type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
}

impl RoomRef {
    /// Creates a reference carrying only an identity.
    pub fn id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

impl From<&Room> for RoomRef {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            roomno: Some(room.roomno.clone()),
            floor: room.floor,
            room_type: room.room_type.clone(),
        }
    }
}

/// Partial update for a [`Room`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoomPatch {
    #[allow(missing_docs)]
    pub id: Option<i64>,
    #[allow(missing_docs)]
    pub roomno: Option<String>,
    #[allow(missing_docs)]
    pub floor: Option<i32>,
    #[allow(missing_docs)]
    #[serde(rename = "type")]
    pub room_type: Option<String>,
}

impl EntityPatch for RoomPatch {
    fn id(&self) -> Option<i64> {
        self.id
    }
}
