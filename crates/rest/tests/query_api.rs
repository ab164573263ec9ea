//! REST API list, count and paging tests.

mod common;

use axum::http::{HeaderName, StatusCode};
use common::{ids, seed, test_server, test_server_with};
use roomkeeper_rest::ServerConfig;
use serde_json::Value;

const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");
const LINK: HeaderName = HeaderName::from_static("link");

// =============================================================================
// Filter Tests
// =============================================================================

#[tokio::test]
async fn test_list_without_filters_returns_everything() {
    let server = test_server();
    let seeded = seed(&server).await;

    let rooms: Value = server.get("/api/rooms").await.json();
    assert_eq!(ids(&rooms), seeded.rooms);

    let count: u64 = server.get("/api/rooms/count").await.json();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn test_floor_less_than() {
    let server = test_server();
    let seeded = seed(&server).await;

    let below_two: Value = server
        .get("/api/rooms")
        .add_query_param("floor.lessThan", 2)
        .await
        .json();
    assert_eq!(ids(&below_two), vec![seeded.rooms[0], seeded.rooms[1]]);

    let below_one: Value = server
        .get("/api/rooms")
        .add_query_param("floor.lessThan", 1)
        .await
        .json();
    assert!(ids(&below_one).is_empty());
}

#[tokio::test]
async fn test_facility_by_room_id() {
    let server = test_server();
    let seeded = seed(&server).await;

    let found: Value = server
        .get("/api/facilities")
        .add_query_param("roomId.equals", seeded.rooms[0])
        .await
        .json();
    assert_eq!(ids(&found), vec![seeded.facilities[0]]);

    let missing = seeded.rooms.iter().max().unwrap() + 1;
    let none: Value = server
        .get("/api/facilities")
        .add_query_param("roomId.equals", missing)
        .await
        .json();
    assert!(ids(&none).is_empty());
}

#[tokio::test]
async fn test_contains_and_does_not_contain_are_complements() {
    let server = test_server();
    let seeded = seed(&server).await;

    let with: Value = server
        .get("/api/residents")
        .add_query_param("email.contains", "example.com")
        .await
        .json();
    let without: Value = server
        .get("/api/residents")
        .add_query_param("email.doesNotContain", "example.com")
        .await
        .json();

    assert_eq!(ids(&with), vec![seeded.residents[0], seeded.residents[1]]);
    assert_eq!(ids(&without), vec![seeded.residents[2]]);
}

#[tokio::test]
async fn test_repeated_in_parameters_accumulate() {
    let server = test_server();
    let seeded = seed(&server).await;

    let found: Value = server
        .get("/api/rooms")
        .add_query_param("roomno.in", "101")
        .add_query_param("roomno.in", "201")
        .await
        .json();

    assert_eq!(ids(&found), vec![seeded.rooms[0], seeded.rooms[2]]);
}

#[tokio::test]
async fn test_boolean_filters() {
    let server = test_server();
    let seeded = seed(&server).await;

    let no_ac: Value = server
        .get("/api/facilities")
        .add_query_param("aC.equals", false)
        .await
        .json();
    assert_eq!(ids(&no_ac), vec![seeded.facilities[1]]);

    let wifi_unset: Value = server
        .get("/api/facilities")
        .add_query_param("wifi.specified", false)
        .await
        .json();
    assert_eq!(ids(&wifi_unset), vec![seeded.facilities[1]]);
}

#[tokio::test]
async fn test_room_by_resident_with_distinct() {
    let server = test_server();
    let seeded = seed(&server).await;

    let found: Value = server
        .get("/api/rooms")
        .add_query_param("residentId.in", format!("{},{}", seeded.residents[0], seeded.residents[1]))
        .add_query_param("distinct", true)
        .await
        .json();

    assert_eq!(ids(&found), vec![seeded.rooms[0], seeded.rooms[1]]);
}

#[tokio::test]
async fn test_count_matches_list() {
    let server = test_server();
    seed(&server).await;

    let list: Value = server
        .get("/api/residents")
        .add_query_param("roomId.specified", true)
        .await
        .json();
    let count: u64 = server
        .get("/api/residents/count")
        .add_query_param("roomId.specified", true)
        .await
        .json();

    assert_eq!(count, 2);
    assert_eq!(ids(&list).len() as u64, count);
}

#[tokio::test]
async fn test_unknown_field_and_operator_ignored() {
    let server = test_server();
    let seeded = seed(&server).await;

    let found: Value = server
        .get("/api/rooms")
        .add_query_param("colour.equals", "red")
        .add_query_param("floor.between", "1")
        .add_query_param("verbose", "yes")
        .await
        .json();

    assert_eq!(ids(&found), seeded.rooms);
}

#[tokio::test]
async fn test_invalid_filter_value_rejected() {
    let server = test_server();

    let response = server
        .get("/api/rooms")
        .add_query_param("floor.equals", "first")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/facilities/count")
        .add_query_param("wifi.contains", "t")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// Sort and Paging Tests
// =============================================================================

#[tokio::test]
async fn test_sort_by_multiple_properties() {
    let server = test_server();
    let seeded = seed(&server).await;

    let sorted: Value = server
        .get("/api/rooms")
        .add_query_param("sort", "floor,desc")
        .add_query_param("sort", "roomno,asc")
        .await
        .json();

    assert_eq!(
        ids(&sorted),
        vec![seeded.rooms[2], seeded.rooms[0], seeded.rooms[1]]
    );
}

#[tokio::test]
async fn test_sort_by_unknown_property_rejected() {
    let server = test_server();

    let response = server
        .get("/api/rooms")
        .add_query_param("sort", "colour")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_first_page_headers() {
    let server = test_server();
    let seeded = seed(&server).await;

    let response = server
        .get("/api/rooms")
        .add_query_param("page", 0)
        .add_query_param("size", 2)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec![seeded.rooms[0], seeded.rooms[1]]);
    assert_eq!(response.header(TOTAL_COUNT), "3");

    let link = response.header(LINK);
    let link = link.to_str().unwrap();
    assert!(link.contains("page=1&size=2>; rel=\"next\""));
    assert!(!link.contains("rel=\"prev\""));
    assert!(link.contains("page=1&size=2>; rel=\"last\""));
    assert!(link.contains("page=0&size=2>; rel=\"first\""));
}

#[tokio::test]
async fn test_last_page_keeps_filters_in_links() {
    let server = test_server();
    let seeded = seed(&server).await;

    let response = server
        .get("/api/residents")
        .add_query_param("email.contains", "example")
        .add_query_param("page", 1)
        .add_query_param("size", 2)
        .await;

    let body: Value = response.json();
    assert_eq!(ids(&body), vec![seeded.residents[2]]);

    let link = response.header(LINK);
    let link = link.to_str().unwrap();
    assert!(link.contains("/api/residents?email.contains=example&page=0&size=2>; rel=\"prev\""));
    assert!(!link.contains("rel=\"next\""));
}

#[tokio::test]
async fn test_page_size_clamped_to_max() {
    let server = test_server_with(ServerConfig {
        max_page_size: 2,
        default_page_size: 2,
        ..ServerConfig::for_testing()
    });
    seed(&server).await;

    let response = server
        .get("/api/rooms")
        .add_query_param("size", 50)
        .await;

    let body: Value = response.json();
    assert_eq!(ids(&body).len(), 2);
    assert_eq!(response.header(TOTAL_COUNT), "3");
}

#[tokio::test]
async fn test_unpaged_list_has_no_paging_headers() {
    let server = test_server();
    seed(&server).await;

    let response = server.get("/api/facilities").await;

    assert!(response.headers().get(TOTAL_COUNT).is_none());
    assert!(response.headers().get(LINK).is_none());
}
