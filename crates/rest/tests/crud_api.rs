//! REST API CRUD tests.
//!
//! Covers status codes, alert headers, Location and the identity checks of
//! create, update and partial update.

mod common;

use axum::http::{HeaderName, StatusCode};
use common::{create, seed, test_server};
use serde_json::{Value, json};

const ALERT: HeaderName = HeaderName::from_static("x-roomkeeperapp-alert");
const ERROR: HeaderName = HeaderName::from_static("x-roomkeeperapp-error");
const PARAMS: HeaderName = HeaderName::from_static("x-roomkeeperapp-params");

// =============================================================================
// Create Tests
// =============================================================================

#[tokio::test]
async fn test_create_room_returns_201_with_headers() {
    let server = test_server();

    let response = server
        .post("/api/rooms")
        .json(&json!({"roomno": "101", "floor": 1, "type": "single"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["roomno"], "101");
    assert_eq!(body["type"], "single");
    assert_eq!(body["residents"], json!([]));

    assert_eq!(
        response.header("location"),
        format!("http://localhost:8080/api/rooms/{}", id).as_str()
    );
    assert_eq!(
        response.header(ALERT),
        format!("A new room is created with identifier {}", id).as_str()
    );
    assert_eq!(response.header(PARAMS), id.to_string().as_str());
}

#[tokio::test]
async fn test_create_with_id_rejected() {
    let server = test_server();

    let response = server
        .post("/api/residents")
        .json(&json!({"id": 5, "email": "a@x.com"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.header(ERROR), "error.idexists");
    assert_eq!(response.header(PARAMS), "resident");
    assert_eq!(response.header("content-type"), "application/problem+json");

    let body: Value = response.json();
    assert_eq!(body["errorKey"], "idexists");
    assert_eq!(body["entityName"], "resident");
    assert_eq!(body["status"], 400);

    let list: Value = server.get("/api/residents").await.json();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_resident_without_email_rejected() {
    let server = test_server();

    let response = server
        .post("/api/residents")
        .json(&json!({"firstname": "Ann"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_duplicate_roomno_conflicts() {
    let server = test_server();
    create(&server, "rooms", json!({"roomno": "101"})).await;

    let response = server.post("/api/rooms").json(&json!({"roomno": "101"})).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_with_unknown_room_rejected() {
    let server = test_server();

    let response = server
        .post("/api/facilities")
        .json(&json!({"wifi": true, "room": {"id": 42}}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_unsupported_media_type() {
    let server = test_server();

    let response = server
        .post("/api/rooms")
        .text("roomno=101")
        .content_type("text/plain")
        .await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_create_malformed_json() {
    let server = test_server();

    let response = server
        .post("/api/rooms")
        .text("{\"roomno\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update Tests
// =============================================================================

#[tokio::test]
async fn test_update_replaces_fields() {
    let server = test_server();
    let id = create(&server, "rooms", json!({"roomno": "101", "floor": 1})).await;

    let response = server
        .put(&format!("/api/rooms/{}", id))
        .json(&json!({"id": id, "roomno": "101A", "type": "double"}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(ALERT),
        format!("A room is updated with identifier {}", id).as_str()
    );
    let body: Value = response.json();
    assert_eq!(body["roomno"], "101A");
    assert_eq!(body["type"], "double");
    assert!(body.get("floor").is_none());
}

#[tokio::test]
async fn test_update_without_id_rejected() {
    let server = test_server();
    let id = create(&server, "rooms", json!({"roomno": "101"})).await;

    let response = server
        .put(&format!("/api/rooms/{}", id))
        .json(&json!({"roomno": "102"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.header(ERROR), "error.idnull");
}

#[tokio::test]
async fn test_update_id_mismatch_rejected() {
    let server = test_server();
    let id = create(&server, "rooms", json!({"roomno": "101"})).await;

    let response = server
        .put(&format!("/api/rooms/{}", id))
        .json(&json!({"id": id + 1, "roomno": "102"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.header(ERROR), "error.idinvalid");
}

#[tokio::test]
async fn test_update_missing_entity_rejected() {
    let server = test_server();

    let response = server
        .put("/api/facilities/99")
        .json(&json!({"id": 99, "wifi": true}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.header(ERROR), "error.idnotfound");
    let body: Value = response.json();
    assert_eq!(body["entityName"], "facility");
}

// =============================================================================
// Partial Update Tests
// =============================================================================

#[tokio::test]
async fn test_partial_update_changes_only_given_fields() {
    let server = test_server();
    let seeded = seed(&server).await;
    let id = seeded.residents[1];

    let response = server
        .patch(&format!("/api/residents/{}", id))
        .json(&json!({"id": id, "lastname": "Ray"}))
        .content_type("application/merge-patch+json")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["lastname"], "Ray");
    assert_eq!(body["firstname"], "Bob");
    assert_eq!(body["phonenumber"], "555-0101");
    assert_eq!(body["room"]["id"], seeded.rooms[1]);
}

#[tokio::test]
async fn test_partial_update_empty_patch_is_noop() {
    let server = test_server();
    let seeded = seed(&server).await;
    let id = seeded.facilities[1];
    let before: Value = server.get(&format!("/api/facilities/{}", id)).await.json();

    let response = server
        .patch(&format!("/api/facilities/{}", id))
        .json(&json!({"id": id}))
        .await;

    response.assert_status_ok();
    let after: Value = server.get(&format!("/api/facilities/{}", id)).await.json();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_partial_update_identity_checks() {
    let server = test_server();
    let id = create(&server, "rooms", json!({"roomno": "101"})).await;

    let response = server
        .patch(&format!("/api/rooms/{}", id))
        .json(&json!({"floor": 3}))
        .await;
    assert_eq!(response.header(ERROR), "error.idnull");

    let response = server
        .patch(&format!("/api/rooms/{}", id))
        .json(&json!({"id": id + 7, "floor": 3}))
        .await;
    assert_eq!(response.header(ERROR), "error.idinvalid");

    let response = server
        .patch("/api/rooms/500")
        .json(&json!({"id": 500, "floor": 3}))
        .await;
    assert_eq!(response.header(ERROR), "error.idnotfound");
}

// =============================================================================
// Read / Delete Tests
// =============================================================================

#[tokio::test]
async fn test_read_room_embeds_residents_without_back_reference() {
    let server = test_server();
    let seeded = seed(&server).await;

    let response = server.get(&format!("/api/rooms/{}", seeded.rooms[1])).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let residents = body["residents"].as_array().unwrap();
    assert_eq!(residents.len(), 1);
    assert_eq!(residents[0]["email"], "bob@example.com");
    assert!(residents[0].get("room").is_none());
}

#[tokio::test]
async fn test_read_missing_returns_404() {
    let server = test_server();

    let response = server.get("/api/rooms/12").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_returns_204_with_alert() {
    let server = test_server();
    let seeded = seed(&server).await;
    let id = seeded.rooms[0];

    let response = server.delete(&format!("/api/rooms/{}", id)).await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(
        response.header(ALERT),
        format!("A room is deleted with identifier {}", id).as_str()
    );
    server
        .get(&format!("/api/rooms/{}", id))
        .await
        .assert_status_not_found();

    // The resident and facility of the deleted room remain, unassigned.
    let resident: Value = server
        .get(&format!("/api/residents/{}", seeded.residents[0]))
        .await
        .json();
    assert!(resident.get("room").is_none());
    let facility: Value = server
        .get(&format!("/api/facilities/{}", seeded.facilities[0]))
        .await
        .json();
    assert!(facility.get("room").is_none());
}

#[tokio::test]
async fn test_delete_missing_is_noop() {
    let server = test_server();

    let response = server.delete("/api/residents/77").await;

    response.assert_status(StatusCode::NO_CONTENT);
}

// =============================================================================
// Routing Tests
// =============================================================================

#[tokio::test]
async fn test_put_and_patch_on_collection_not_allowed() {
    let server = test_server();

    server
        .put("/api/rooms")
        .json(&json!({"roomno": "101"}))
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    server
        .patch("/api/residents")
        .json(&json!({"email": "a@x.com"}))
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let server = test_server();

    let response = server.get("/api/rooms/abc").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = test_server();

    let health = server.get("/health").await;
    health.assert_status_ok();
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "sqlite");

    server.get("/_liveness").await.assert_status_ok();

    let ready: Value = server.get("/_readiness").await.json();
    assert_eq!(ready["checks"]["storage"], "ok");
}
