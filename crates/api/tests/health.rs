//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["articles"], 2);
}

#[tokio::test]
async fn health_reports_empty_store_when_not_seeded() {
    let mut config = common::test_config();
    config.seed_articles = false;
    let app = common::build_test_app(stock_api::state::AppState::new(config));

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["articles"], 0);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(
        request_id.to_str().unwrap().len(),
        36,
        "x-request-id should be a UUID string"
    );
}
