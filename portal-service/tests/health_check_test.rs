mod common;

use axum::http::StatusCode;
use common::{body_json, TestApp};

#[tokio::test]
async fn test_health_check_reports_healthy() {
    let app = TestApp::spawn();

    let response = app.get("/health", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "portal-service");
    assert_eq!(body["checks"]["database"], "up");
}
