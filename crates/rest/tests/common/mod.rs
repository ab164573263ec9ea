//! Shared fixtures for REST integration tests.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use roomkeeper_persistence::backends::sqlite::SqliteBackend;
use roomkeeper_rest::{ServerConfig, create_app_with_config};
use serde_json::{Value, json};

/// Creates a test server over a fresh in-memory database.
pub fn test_server() -> TestServer {
    test_server_with(ServerConfig::for_testing())
}

/// Creates a test server with a custom configuration.
pub fn test_server_with(config: ServerConfig) -> TestServer {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let app = create_app_with_config(backend, config);
    TestServer::new(app).expect("Failed to create test server")
}

/// Posts `body` to `collection` and returns the assigned identity.
pub async fn create(server: &TestServer, collection: &str, body: Value) -> i64 {
    let response = server.post(&format!("/api/{}", collection)).json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_i64()
        .expect("created entity has an id")
}

/// Identities of seeded rows.
pub struct Seeded {
    pub rooms: Vec<i64>,
    pub residents: Vec<i64>,
    pub facilities: Vec<i64>,
}

/// Seeds three rooms, three residents and two facilities.
pub async fn seed(server: &TestServer) -> Seeded {
    let rooms = vec![
        create(server, "rooms", json!({"roomno": "101", "floor": 1, "type": "single"})).await,
        create(server, "rooms", json!({"roomno": "102", "floor": 1, "type": "double"})).await,
        create(server, "rooms", json!({"roomno": "201", "floor": 2, "type": "suite"})).await,
    ];

    let residents = vec![
        create(
            server,
            "residents",
            json!({"firstname": "Ann", "lastname": "Lee", "email": "ann@example.com", "room": {"id": rooms[0]}}),
        )
        .await,
        create(
            server,
            "residents",
            json!({"firstname": "Bob", "email": "bob@example.com", "phonenumber": "555-0101", "room": {"id": rooms[1]}}),
        )
        .await,
        create(server, "residents", json!({"email": "cid@example.org"})).await,
    ];

    let facilities = vec![
        create(
            server,
            "facilities",
            json!({"aC": true, "wifi": true, "room": {"id": rooms[0]}}),
        )
        .await,
        create(
            server,
            "facilities",
            json!({"aC": false, "parking": true, "room": {"id": rooms[1]}}),
        )
        .await,
    ];

    Seeded {
        rooms,
        residents,
        facilities,
    }
}

/// Collects the `id` of every element of a JSON array.
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("JSON array")
        .iter()
        .filter_map(|item| item["id"].as_i64())
        .collect()
}
