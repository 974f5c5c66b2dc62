mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{assert_error_body, body_json, TestApp};
use portal_service::services::AdminTokenClaims;
use portal_service::store::PortalStore;
use uuid::Uuid;

fn create_body() -> serde_json::Value {
    serde_json::json!({
        "action": "create",
        "data": { "name": "Literacy drive" }
    })
}

async fn valid_token(app: &TestApp) -> String {
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "secret123").await;
    app.tokens
        .issue(admin.id, admin.user_id, admin.division_id)
        .unwrap()
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = TestApp::spawn();

    let response = app.post_json("/admin/programs", create_body(), &[]).await;
    assert_error_body(response, StatusCode::UNAUTHORIZED, "Admin token required").await;
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::spawn();

    let response = app
        .post_json(
            "/admin/programs",
            create_body(),
            &[("x-admin-token", "not-a-token")],
        )
        .await;
    assert_error_body(response, StatusCode::UNAUTHORIZED, "Invalid or expired token").await;
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let app = TestApp::spawn();
    let token = valid_token(&app).await;

    // Flip a character in the signature segment
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'a' { 'b' } else { 'a' });

    let response = app
        .post_json(
            "/admin/programs",
            create_body(),
            &[("x-admin-token", tampered.as_str())],
        )
        .await;
    assert_error_body(response, StatusCode::UNAUTHORIZED, "Invalid or expired token").await;
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "secret123").await;

    let expired = app
        .tokens
        .encode(&AdminTokenClaims {
            admin_id: admin.id,
            user_id: admin.user_id,
            division_id: admin.division_id,
            exp: Utc::now().timestamp_millis() - 1_000,
        })
        .unwrap();

    let response = app
        .post_json(
            "/admin/programs",
            create_body(),
            &[("x-admin-token", expired.as_str())],
        )
        .await;
    assert_error_body(response, StatusCode::UNAUTHORIZED, "Token expired").await;
}

#[tokio::test]
async fn test_deactivation_invalidates_outstanding_tokens() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "secret123").await;

    let response = app.login("9876543210", "secret123").await;
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    app.store.set_admin_active(admin.id, false).await.unwrap();

    let response = app
        .post_json(
            "/admin/programs",
            create_body(),
            &[("x-admin-token", token.as_str())],
        )
        .await;
    assert_error_body(
        response,
        StatusCode::UNAUTHORIZED,
        "Your account has been deactivated. Contact Super Admin.",
    )
    .await;
}

#[tokio::test]
async fn test_token_for_unknown_admin_is_rejected() {
    let app = TestApp::spawn();

    let token = app
        .tokens
        .issue(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
        .unwrap();

    let response = app
        .post_json(
            "/admin/programs",
            create_body(),
            &[("x-admin-token", token.as_str())],
        )
        .await;
    assert_error_body(
        response,
        StatusCode::UNAUTHORIZED,
        "Admin account not found or inactive",
    )
    .await;
}
