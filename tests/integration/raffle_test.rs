//! Raffle CRUD and availability endpoint tests.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn created_raffle_always_has_the_full_number_space() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Full space").await;

    let response = app
        .request("GET", &format!("/api/raffles/{raffle_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["total_numbers"], 1000);
    assert_eq!(data["currency"], "BCV");
    assert_eq!(data["taken_numbers"], serde_json::json!([]));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn raffle_creation_validates_title_and_price() {
    let app = TestApp::new().await;

    let blank_title = serde_json::json!({
        "title": "  ",
        "price": 25.0,
        "end_date": "2030-12-31T23:59:59Z",
    });
    let response = app.request("POST", "/api/raffles", Some(blank_title)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let zero_price = serde_json::json!({
        "title": "Zero price",
        "price": 0.0,
        "end_date": "2030-12-31T23:59:59Z",
    });
    let response = app.request("POST", "/api/raffles", Some(zero_price)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn update_changes_fields_but_never_the_number_space() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Before update").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/raffles/{raffle_id}"),
            Some(serde_json::json!({
                "title": "After update",
                "price": 30.0,
                "end_date": "2031-06-30T23:59:59Z",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let data = &response.body["data"];
    assert_eq!(data["title"], "After update");
    assert_eq!(data["price"], 30.0);
    assert_eq!(data["total_numbers"], 1000);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn list_returns_raffles_with_their_taken_sets() {
    let app = TestApp::new().await;
    let raffle_a = app.create_test_raffle("List A").await;
    let _raffle_b = app.create_test_raffle("List B").await;

    app.reserve(raffle_a, &["900"]).await;

    let response = app.request("GET", "/api/raffles", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let raffles = response.body["data"].as_array().expect("array of raffles");
    assert_eq!(raffles.len(), 2);

    let entry_a = raffles
        .iter()
        .find(|r| r["id"] == serde_json::json!(raffle_a))
        .expect("raffle A in listing");
    assert_eq!(entry_a["taken_numbers"], serde_json::json!(["900"]));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn unknown_raffle_availability_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            &format!("/api/raffles/{}/availability", Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn raffle_ticket_listing_carries_numbers() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Ticket listing").await;

    app.reserve(raffle_id, &["010", "011"]).await;
    app.reserve(raffle_id, &["012"]).await;

    let response = app
        .request("GET", &format!("/api/raffles/{raffle_id}/tickets"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let tickets = response.body["data"].as_array().expect("array of tickets");
    assert_eq!(tickets.len(), 2);
    for ticket in tickets {
        assert!(!ticket["numbers"].as_array().unwrap().is_empty());
        assert_eq!(ticket["status"], "pending");
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn health_endpoint_reports_database_state() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "connected");
}
