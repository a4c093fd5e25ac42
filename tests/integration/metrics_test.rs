//! Dashboard metrics aggregation tests.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn empty_database_reports_zeroes() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/metrics/dashboard", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["active_raffles"], 0);
    assert_eq!(data["pending_tickets"], 0);
    assert_eq!(data["todays_sales_count"], 0);
    assert_eq!(data["todays_sales_amount"], 0.0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn pending_reservations_and_paid_sales_are_counted() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Metrics").await;

    let response = app.reserve(raffle_id, &["001", "002"]).await;
    assert_eq!(response.status, StatusCode::OK);
    let ticket_id = response.body["data"]["ticket_id"].as_str().unwrap().to_string();

    let metrics = app.request("GET", "/api/metrics/dashboard", None).await;
    let data = &metrics.body["data"];
    assert_eq!(data["active_raffles"], 1);
    assert_eq!(data["pending_tickets"], 1);
    assert_eq!(data["todays_sales_count"], 0);

    // Confirming payment moves the ticket from pending to today's sales.
    let paid = app
        .request(
            "PUT",
            &format!("/api/tickets/{ticket_id}/status"),
            Some(serde_json::json!({ "status": "paid" })),
        )
        .await;
    assert_eq!(paid.status, StatusCode::OK);

    let metrics = app.request("GET", "/api/metrics/dashboard", None).await;
    let data = &metrics.body["data"];
    assert_eq!(data["pending_tickets"], 0);
    assert_eq!(data["todays_sales_count"], 1);
    assert_eq!(data["todays_sales_amount"], 50.0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn pending_count_endpoint_tracks_a_single_raffle() {
    let app = TestApp::new().await;
    let raffle_a = app.create_test_raffle("Raffle A").await;
    let raffle_b = app.create_test_raffle("Raffle B").await;

    app.reserve(raffle_a, &["001"]).await;
    app.reserve(raffle_a, &["002"]).await;
    app.reserve(raffle_b, &["001"]).await;

    let response = app
        .request(
            "GET",
            &format!("/api/raffles/{raffle_a}/tickets/pending-count"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"], 2);
}
