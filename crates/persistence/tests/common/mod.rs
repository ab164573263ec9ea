//! Shared fixtures for persistence integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use roomkeeper_persistence::backends::sqlite::SqliteBackend;
use roomkeeper_persistence::model::{Facility, Resident, Room};
use roomkeeper_persistence::service::{CrudService, QueryService};

/// Services over one fresh in-memory database.
pub struct Harness {
    pub backend: Arc<SqliteBackend>,
    pub crud: CrudService<SqliteBackend>,
    pub queries: QueryService<SqliteBackend>,
}

pub fn harness() -> Harness {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    let backend = Arc::new(backend);
    Harness {
        crud: CrudService::new(backend.clone()),
        queries: QueryService::new(backend.clone()),
        backend,
    }
}

/// Rooms, residents and facilities covering set, unset and shared values.
pub struct Seed {
    pub rooms: Vec<Room>,
    pub residents: Vec<Resident>,
    pub facilities: Vec<Facility>,
}

impl Harness {
    pub async fn seed(&self) -> Seed {
        let mut rooms = Vec::new();
        for room in [
            Room::new("101").with_floor(1).with_type("single"),
            Room::new("102").with_floor(1).with_type("double"),
            Room::new("201").with_floor(2).with_type("Single"),
            Room::new("B1"),
        ] {
            rooms.push(self.crud.create(room).await.expect("seed room"));
        }
        let room_id = |i: usize| rooms[i].id.expect("seeded room id");

        let mut residents = Vec::new();
        for resident in [
            Resident::new("ann@example.com")
                .with_name("Ann", "Lee")
                .with_room(room_id(0)),
            Resident::new("bob@example.com")
                .with_name("Bob", "Ray")
                .with_phonenumber("555-0101")
                .with_room(room_id(1)),
            Resident::new("cid@example.org")
                .with_name("Cid", "Lee")
                .with_room(room_id(1)),
            Resident::new("dee@example.org"),
        ] {
            residents.push(self.crud.create(resident).await.expect("seed resident"));
        }

        let mut facilities = Vec::new();
        for facility in [
            Facility::new()
                .with_a_c(true)
                .with_wifi(true)
                .with_room(room_id(0)),
            Facility::new()
                .with_a_c(false)
                .with_parking(true)
                .with_room(room_id(1)),
            Facility::new().with_wifi(false),
        ] {
            facilities.push(self.crud.create(facility).await.expect("seed facility"));
        }

        Seed {
            rooms,
            residents,
            facilities,
        }
    }
}

pub fn ids<T>(items: &[T], id: impl Fn(&T) -> Option<i64>) -> Vec<i64> {
    items.iter().filter_map(id).collect()
}
