//! Reservation transaction tests: the conflict check, atomicity, and the
//! concurrent-overlap race.

use http::StatusCode;
use uuid::Uuid;

use rifa_core::error::ErrorKind;
use rifa_entity::ticket::model::CreateTicket;
use rifa_service::ticket::service::ReserveRequest;

use crate::helpers::TestApp;

fn reserve_request(raffle_id: Uuid, numbers: &[&str]) -> ReserveRequest {
    ReserveRequest {
        raffle_id,
        full_name: "Jose Gomez".to_string(),
        email: "jose@example.com".to_string(),
        phone: "0424-5559876".to_string(),
        cedula: "V-87654321".to_string(),
        numbers: numbers.iter().map(|s| s.to_string()).collect(),
        total_amount: 25.0 * numbers.len() as f64,
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn fresh_raffle_reservation_succeeds() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Scenario A").await;

    let response = app.reserve(raffle_id, &["000", "001"]).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let ticket_id = response.body["data"]["ticket_id"]
        .as_str()
        .expect("no ticket_id");

    // The new ticket is pending and its numbers are taken.
    let ticket = app
        .request("GET", &format!("/api/tickets/{ticket_id}"), None)
        .await;
    assert_eq!(ticket.status, StatusCode::OK);
    assert_eq!(ticket.body["data"]["status"], "pending");
    assert_eq!(app.taken_numbers(raffle_id).await, vec!["000", "001"]);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn conflict_lists_exact_overlap_and_commits_nothing() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Scenario B").await;

    let first = app.reserve(raffle_id, &["005"]).await;
    assert_eq!(first.status, StatusCode::OK);
    let first_id = first.body["data"]["ticket_id"].as_str().unwrap().to_string();
    let paid = app
        .request(
            "PUT",
            &format!("/api/tickets/{first_id}/status"),
            Some(serde_json::json!({ "status": "paid" })),
        )
        .await;
    assert_eq!(paid.status, StatusCode::OK);

    let count_before = app.ticket_count(raffle_id).await;

    let response = app.reserve(raffle_id, &["005", "006"]).await;
    assert_eq!(response.status, StatusCode::CONFLICT, "{:?}", response.body);
    assert_eq!(
        response.body["details"]["conflicting_numbers"],
        serde_json::json!(["005"])
    );

    // No partial commit: row count and taken set are unchanged.
    assert_eq!(app.ticket_count(raffle_id).await, count_before);
    assert_eq!(app.taken_numbers(raffle_id).await, vec!["005"]);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn rejected_ticket_does_not_block_reuse() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Scenario C").await;

    let first = app.reserve(raffle_id, &["010"]).await;
    assert_eq!(first.status, StatusCode::OK);
    let first_id = first.body["data"]["ticket_id"].as_str().unwrap().to_string();

    let rejected = app
        .request(
            "PUT",
            &format!("/api/tickets/{first_id}/status"),
            Some(serde_json::json!({ "status": "rejected" })),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);

    let second = app.reserve(raffle_id, &["010"]).await;
    assert_eq!(second.status, StatusCode::OK, "{:?}", second.body);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn structural_validation_rejects_bad_requests() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Validation").await;

    // Empty number list.
    let response = app.reserve(raffle_id, &[]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Blank purchaser name.
    let body = serde_json::json!({
        "raffle_id": raffle_id,
        "full_name": "   ",
        "email": "maria@example.com",
        "numbers": ["001"],
        "total_amount": 25.0,
    });
    let response = app.request("POST", "/api/tickets", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Duplicate numbers.
    let response = app.reserve(raffle_id, &["002", "002"]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Unknown raffle.
    let response = app.reserve(Uuid::new_v4(), &["003"]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Nothing was committed by any of the above.
    assert_eq!(app.ticket_count(raffle_id).await, 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn failed_number_insert_leaves_no_orphan_ticket() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Rollback").await;

    // Drive the repository directly with a number the column rejects
    // (varchar(3) overflow) so the second insert of the transaction fails.
    let data = CreateTicket {
        raffle_id,
        full_name: "Jose Gomez".to_string(),
        email: "jose@example.com".to_string(),
        phone: "0424-5559876".to_string(),
        cedula: "V-87654321".to_string(),
        total_amount: 25.0,
    };
    let numbers = vec!["0001".to_string()];

    let result = app.state.ticket_repo.reserve(&data, &numbers).await;
    assert!(result.is_err());

    // The transaction rolled back; no pending ticket without numbers.
    assert_eq!(app.ticket_count(raffle_id).await, 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn concurrent_overlapping_reservations_have_one_winner() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Race").await;

    let service = &app.state.ticket_service;
    let left = service.reserve(reserve_request(raffle_id, &["500", "501"]));
    let right = service.reserve(reserve_request(raffle_id, &["500", "502"]));

    // Both pass the pre-check before either commits; the per-raffle lock
    // decides the winner inside the transaction.
    let (left, right) = tokio::join!(left, right);

    let loser = match (left, right) {
        (Ok(_), Err(e)) | (Err(e), Ok(_)) => e,
        (Ok(_), Ok(_)) => panic!("both overlapping reservations succeeded"),
        (Err(l), Err(r)) => panic!("both reservations failed: {l} / {r}"),
    };

    assert_eq!(loser.kind, ErrorKind::Conflict);
    let details = loser.details.expect("conflict carries details");
    assert_eq!(details["conflicting_numbers"], serde_json::json!(["500"]));

    // Exactly the winner's numbers are taken.
    let taken = app.taken_numbers(raffle_id).await;
    assert_eq!(taken.len(), 2);
    assert!(taken.contains(&"500".to_string()));
    assert_eq!(app.ticket_count(raffle_id).await, 1);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set RIFA_TEST_DATABASE_URL)"]
async fn availability_read_is_idempotent() {
    let app = TestApp::new().await;
    let raffle_id = app.create_test_raffle("Idempotent").await;

    let response = app.reserve(raffle_id, &["100", "200", "300"]).await;
    assert_eq!(response.status, StatusCode::OK);

    let first = app.taken_numbers(raffle_id).await;
    let second = app.taken_numbers(raffle_id).await;
    assert_eq!(first, second);

    // Every element is a canonical member of the 000..999 space.
    for number in &first {
        assert!(rifa_entity::number::is_valid_number(number));
    }
}
