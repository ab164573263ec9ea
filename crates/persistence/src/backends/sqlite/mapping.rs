//! Row mapping between entities and their tables.

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::model::{Entity, Facility, Resident, Room, RoomRef};

use super::specification::{RelationJoin, Specification, SpecificationBuilder, SqlParam};

/// An entity with a SQLite table.
///
/// Rows are read as `id` followed by [`COLUMNS`](Self::COLUMNS), and
/// [`column_values`](Self::column_values) binds in the same order.
pub trait SqliteEntity: Entity {
    /// Table name.
    const TABLE: &'static str;

    /// Every column except `id`.
    const COLUMNS: &'static [&'static str];

    /// Reads an entity from a row of `id` plus [`Self::COLUMNS`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Values for [`Self::COLUMNS`], in order.
    fn column_values(&self) -> Vec<SqlParam>;

    /// Maps a sortable JSON property to its column.
    fn sort_column(property: &str) -> Option<&'static str>;

    /// Fills embedded relations after the row itself was read.
    fn load_relations(&mut self, conn: &Connection) -> rusqlite::Result<()>;

    /// Translates a criteria object into a query over [`Self::TABLE`].
    fn specification(criteria: &Self::Criteria) -> Specification;
}

/// Every column of an entity table, `id` first.
pub(crate) fn select_columns<E: SqliteEntity>() -> Vec<&'static str> {
    std::iter::once("id").chain(E::COLUMNS.iter().copied()).collect()
}

static ROOM_RESIDENTS: RelationJoin = RelationJoin {
    alias: "residents",
    table: "resident",
    on: "residents.room_id = e.id",
};

static RESIDENT_ROOM: RelationJoin = RelationJoin {
    alias: "room",
    table: "room",
    on: "room.id = e.room_id",
};

static FACILITY_ROOM: RelationJoin = RelationJoin {
    alias: "room",
    table: "room",
    on: "room.id = e.room_id",
};

fn load_room_ref(conn: &Connection, room: &mut Option<RoomRef>) -> rusqlite::Result<()> {
    let Some(room_id) = room.as_ref().and_then(|r| r.id) else {
        return Ok(());
    };
    *room = conn
        .query_row(
            "SELECT id, roomno, floor, type FROM room WHERE id = ?1",
            params![room_id],
            |row| {
                Ok(RoomRef {
                    id: Some(row.get(0)?),
                    roomno: Some(row.get(1)?),
                    floor: row.get(2)?,
                    room_type: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(())
}

fn room_id_param(room: &Option<RoomRef>) -> SqlParam {
    room.as_ref().and_then(|r| r.id).into()
}

impl SqliteEntity for Room {
    const TABLE: &'static str = "room";
    const COLUMNS: &'static [&'static str] = &["roomno", "floor", "type"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let mut room = Room::new(row.get::<_, String>(1)?);
        room.id = Some(row.get(0)?);
        room.floor = row.get(2)?;
        room.room_type = row.get(3)?;
        Ok(room)
    }

    fn column_values(&self) -> Vec<SqlParam> {
        vec![
            self.roomno.clone().into(),
            self.floor.into(),
            self.room_type.clone().into(),
        ]
    }

    fn sort_column(property: &str) -> Option<&'static str> {
        match property {
            "id" => Some("id"),
            "roomno" => Some("roomno"),
            "floor" => Some("floor"),
            "type" => Some("type"),
            _ => None,
        }
    }

    fn load_relations(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        let Some(id) = self.id else {
            return Ok(());
        };
        let sql = format!(
            "SELECT {} FROM resident WHERE room_id = ?1 ORDER BY id",
            select_columns::<Resident>().join(", ")
        );
        let mut stmt = conn.prepare(&sql)?;
        let residents = stmt
            .query_map(params![id], Resident::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        self.load_residents(residents);
        Ok(())
    }

    fn specification(criteria: &Self::Criteria) -> Specification {
        SpecificationBuilder::new(Self::TABLE)
            .distinct(criteria.distinct)
            .range("id", criteria.id.as_ref())
            .string("roomno", criteria.roomno.as_ref())
            .range("floor", criteria.floor.as_ref())
            .string("type", criteria.room_type.as_ref())
            .relation(&ROOM_RESIDENTS, criteria.resident_id.as_ref())
            .build()
    }
}

impl SqliteEntity for Resident {
    const TABLE: &'static str = "resident";
    const COLUMNS: &'static [&'static str] =
        &["firstname", "lastname", "email", "phonenumber", "room_id"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Resident {
            id: Some(row.get(0)?),
            firstname: row.get(1)?,
            lastname: row.get(2)?,
            email: row.get(3)?,
            phonenumber: row.get(4)?,
            room: row.get::<_, Option<i64>>(5)?.map(RoomRef::id),
        })
    }

    fn column_values(&self) -> Vec<SqlParam> {
        vec![
            self.firstname.clone().into(),
            self.lastname.clone().into(),
            self.email.clone().into(),
            self.phonenumber.clone().into(),
            room_id_param(&self.room),
        ]
    }

    fn sort_column(property: &str) -> Option<&'static str> {
        match property {
            "id" => Some("id"),
            "firstname" => Some("firstname"),
            "lastname" => Some("lastname"),
            "email" => Some("email"),
            "phonenumber" => Some("phonenumber"),
            _ => None,
        }
    }

    fn load_relations(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        load_room_ref(conn, &mut self.room)
    }

    fn specification(criteria: &Self::Criteria) -> Specification {
        SpecificationBuilder::new(Self::TABLE)
            .distinct(criteria.distinct)
            .range("id", criteria.id.as_ref())
            .string("firstname", criteria.firstname.as_ref())
            .string("lastname", criteria.lastname.as_ref())
            .string("email", criteria.email.as_ref())
            .string("phonenumber", criteria.phonenumber.as_ref())
            .relation(&RESIDENT_ROOM, criteria.room_id.as_ref())
            .build()
    }
}

impl SqliteEntity for Facility {
    const TABLE: &'static str = "facility";
    const COLUMNS: &'static [&'static str] = &["a_c", "parking", "wifi", "room_id"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Facility {
            id: Some(row.get(0)?),
            a_c: row.get(1)?,
            parking: row.get(2)?,
            wifi: row.get(3)?,
            room: row.get::<_, Option<i64>>(4)?.map(RoomRef::id),
        })
    }

    fn column_values(&self) -> Vec<SqlParam> {
        vec![
            self.a_c.into(),
            self.parking.into(),
            self.wifi.into(),
            room_id_param(&self.room),
        ]
    }

    fn sort_column(property: &str) -> Option<&'static str> {
        match property {
            "id" => Some("id"),
            "aC" => Some("a_c"),
            "parking" => Some("parking"),
            "wifi" => Some("wifi"),
            _ => None,
        }
    }

    fn load_relations(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        load_room_ref(conn, &mut self.room)
    }

    fn specification(criteria: &Self::Criteria) -> Specification {
        SpecificationBuilder::new(Self::TABLE)
            .distinct(criteria.distinct)
            .range("id", criteria.id.as_ref())
            .boolean("a_c", criteria.a_c.as_ref())
            .boolean("parking", criteria.parking.as_ref())
            .boolean("wifi", criteria.wifi.as_ref())
            .relation(&FACILITY_ROOM, criteria.room_id.as_ref())
            .build()
    }
}
