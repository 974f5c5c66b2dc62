mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{assert_error_body, body_json, TestApp};
use portal_service::services::AdminTokenClaims;
use portal_service::store::PortalStore;

#[tokio::test]
async fn test_login_returns_signed_token_with_24h_expiry() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "secret123").await;

    let before = Utc::now().timestamp_millis();
    let response = app.login("9876543210", "secret123").await;
    let after = Utc::now().timestamp_millis();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["admin"]["id"], admin.id.to_string());
    assert_eq!(body["admin"]["division_id"], division.id.to_string());

    let token = body["token"].as_str().unwrap();
    let claims = app.tokens.decode(token).unwrap();
    assert_eq!(claims.admin_id, admin.id);

    let day_ms = 24 * 60 * 60 * 1000;
    assert!(claims.exp >= before + day_ms && claims.exp <= after + day_ms);
}

#[tokio::test]
async fn test_unknown_phone_and_wrong_password_are_indistinguishable() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    app.seed_admin(division.id, "9876543210", "secret123").await;

    let unknown = app.login("0000000000", "secret123").await;
    let wrong = app.login("9876543210", "not-the-password").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = body_json(unknown).await;
    let wrong_body = body_json(wrong).await;
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["error"], "Invalid phone number or password");
}

#[tokio::test]
async fn test_deactivated_account_is_rejected() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "secret123").await;
    app.store.set_admin_active(admin.id, false).await.unwrap();

    let response = app.login("9876543210", "secret123").await;
    assert_error_body(
        response,
        StatusCode::UNAUTHORIZED,
        "Your account has been deactivated. Contact Super Admin.",
    )
    .await;
}

#[tokio::test]
async fn test_unprovisioned_account_is_rejected() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let mut admin = app.seed_admin(division.id, "9876543210", "secret123").await;
    admin.password_hash = None;
    app.store.insert_admin(&admin).await.unwrap();

    let response = app.login("9876543210", "secret123").await;
    assert_error_body(
        response,
        StatusCode::UNAUTHORIZED,
        "Password not set. Contact Super Admin.",
    )
    .await;
}

#[tokio::test]
async fn test_missing_credentials() {
    let app = TestApp::spawn();

    let response = app
        .post_json("/admin/auth", serde_json::json!({ "phone": "9876543210" }), &[])
        .await;
    assert_error_body(
        response,
        StatusCode::BAD_REQUEST,
        "Phone and password are required",
    )
    .await;

    let response = app
        .post_json("/admin/auth", serde_json::json!({}), &[])
        .await;
    assert_error_body(
        response,
        StatusCode::BAD_REQUEST,
        "Phone and password are required",
    )
    .await;
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let app = TestApp::spawn();

    let response = app
        .post_json(
            "/admin/auth",
            serde_json::json!({
                "action": "register",
                "phone": "9876543210",
                "password": "secret123"
            }),
            &[],
        )
        .await;
    assert_error_body(response, StatusCode::BAD_REQUEST, "Invalid action").await;
}

#[tokio::test]
async fn test_phone_whitespace_is_normalized() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    app.seed_admin(division.id, "9876543210", "secret123").await;

    let response = app.login(" 98765 43210 ", "secret123").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_payload_is_inspectable_without_secret() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "secret123").await;

    let response = app.login("9876543210", "secret123").await;
    let body = body_json(response).await;
    let claims = AdminTokenClaims::peek(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.admin_id, admin.id);
    assert_eq!(claims.division_id, division.id);
}
