//! Integration tests for the HTTP planner client
//!
//! Each test runs against a one-shot stub backend on localhost.

mod common;

use chrono::NaiveDate;
use common::{StubReply, StubServer, closed_port_url, sample_response};
use travemle::client::{CONNECTIVITY_MESSAGE, HttpPlannerClient, PlannerClient, PlannerError};
use travemle::config::{BackendConfig, TripDefaults};
use travemle::form::{PlanningForm, SubmitOutcome, submit};
use travemle::present::ResultSummary;

fn form() -> PlanningForm {
    let today = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
    PlanningForm::with_today(&TripDefaults::default(), today)
}

// =============================================================================
// Success path
// =============================================================================

#[tokio::test]
async fn test_plan_trip_posts_request_and_decodes_plan() {
    let server = StubServer::start(StubReply::Respond("200 OK", sample_response())).await;
    let client = HttpPlannerClient::from_config(&server.backend(5_000)).unwrap();

    let response = client.plan_trip(&form().build_request()).await.unwrap();
    assert_eq!(response.weather.as_deref(), Some("Clouds, 28°C"));
    assert_eq!(response.plan["title"], "Kandy Heritage Escape");

    let body: serde_json::Value = serde_json::from_str(&server.request.await.unwrap()).unwrap();
    assert_eq!(body["origin"], "Colombo");
    assert_eq!(body["city"], "Kandy");
    assert_eq!(body["country"], "Sri Lanka");
    assert_eq!(body["start_date"], "2025-12-20");
    assert_eq!(body["end_date"], "2025-12-23");
    assert_eq!(body["interests"], "Culture, Temple");
    assert_eq!(body["budget"], 50000);
    assert_eq!(body["travel_mode"], "Bus");
}

#[tokio::test]
async fn test_submit_navigates_with_decodable_handoff() {
    let server = StubServer::start(StubReply::Respond("200 OK", sample_response())).await;
    let client = HttpPlannerClient::from_config(&server.backend(5_000)).unwrap();
    let mut form = form();

    let SubmitOutcome::Navigate(handoff) = submit(&mut form, &client).await else {
        panic!("expected navigation");
    };
    assert!(!form.loading);

    let summary = ResultSummary::from_result(&handoff.decode().unwrap(), "LKR");
    assert_eq!(summary.title, "Kandy Heritage Escape");
    assert_eq!(summary.weather, "28°C");
    assert_eq!(summary.activities.len(), 2);
    assert_eq!(summary.activities[0].day, "1");
    assert_eq!(
        summary.budget_rows,
        vec!["Transport: 3000 LKR", "Lodging: 10000 LKR", "Food: 5000 LKR"]
    );
    assert_eq!(summary.total, "LKR 18000");
    assert_eq!(
        summary.map_url.as_deref(),
        Some("https://www.google.com/maps/dir/Colombo/Kandy")
    );
}

#[tokio::test]
async fn test_non_numeric_budget_is_sent_as_null() {
    let server = StubServer::start(StubReply::Respond("200 OK", sample_response())).await;
    let client = HttpPlannerClient::from_config(&server.backend(5_000)).unwrap();
    let mut form = form();
    form.budget = "lots".to_string();

    client.plan_trip(&form.build_request()).await.unwrap();

    let body: serde_json::Value = serde_json::from_str(&server.request.await.unwrap()).unwrap();
    assert!(body["budget"].is_null());
}

// =============================================================================
// Failure paths
// =============================================================================

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let server = StubServer::start(StubReply::Respond(
        "500 Internal Server Error",
        r#"{"detail":"model overloaded"}"#.to_string(),
    ))
    .await;
    let client = HttpPlannerClient::from_config(&server.backend(5_000)).unwrap();

    let err = client.plan_trip(&form().build_request()).await.unwrap_err();
    match err {
        PlannerError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("model overloaded"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_alerts_generic_message() {
    let server = StubServer::start(StubReply::Respond("502 Bad Gateway", String::new())).await;
    let client = HttpPlannerClient::from_config(&server.backend(5_000)).unwrap();
    let mut form = form();

    let outcome = submit(&mut form, &client).await;
    assert_eq!(outcome, SubmitOutcome::Alert(CONNECTIVITY_MESSAGE.to_string()));
    assert!(!form.loading);
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let server = StubServer::start(StubReply::Respond("200 OK", "<html>oops</html>".to_string())).await;
    let client = HttpPlannerClient::from_config(&server.backend(5_000)).unwrap();

    let err = client.plan_trip(&form().build_request()).await.unwrap_err();
    assert!(matches!(err, PlannerError::Json(_)), "got {err:?}");
}

#[tokio::test]
async fn test_empty_body_is_invalid_response() {
    let server = StubServer::start(StubReply::Respond("200 OK", String::new())).await;
    let client = HttpPlannerClient::from_config(&server.backend(5_000)).unwrap();

    let err = client.plan_trip(&form().build_request()).await.unwrap_err();
    assert!(matches!(err, PlannerError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let config = BackendConfig {
        base_url: closed_port_url().await,
        plan_path: "/api/plan-trip/".to_string(),
        timeout_ms: Some(5_000),
    };
    let client = HttpPlannerClient::from_config(&config).unwrap();

    let err = client.plan_trip(&form().build_request()).await.unwrap_err();
    assert!(matches!(err, PlannerError::Network(_)), "got {err:?}");
    assert!(err.is_connectivity());
    assert_eq!(err.user_message(), CONNECTIVITY_MESSAGE);
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = StubServer::start(StubReply::Hang).await;
    let client = HttpPlannerClient::from_config(&server.backend(300)).unwrap();

    let err = client.plan_trip(&form().build_request()).await.unwrap_err();
    assert!(matches!(err, PlannerError::Timeout(_)), "got {err:?}");
    server.request.abort();
}
