mod common;

use axum::http::StatusCode;
use common::{assert_error_body, body_json, TestApp};

#[tokio::test]
async fn test_super_admin_provisions_division_admin() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let (_, jwt) = app.seed_super_admin().await;
    let bearer = format!("Bearer {}", jwt);

    let response = app
        .post_json(
            "/admin/admins",
            serde_json::json!({
                "phone": "9876543210",
                "password": "secret123",
                "division_id": division.id,
                "name": "Meera"
            }),
            &[("authorization", bearer.as_str())],
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["division_id"], division.id.to_string());
    assert_eq!(body["is_active"], true);
    assert!(body.get("password_hash").is_none());

    // The provisioned admin can log in straight away
    let response = app.login("9876543210", "secret123").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_phone_conflicts() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    app.seed_admin(division.id, "9876543210", "secret123").await;
    let (_, jwt) = app.seed_super_admin().await;

    let response = app
        .post_json(
            "/admin/admins",
            serde_json::json!({
                "phone": "9876543210",
                "password": "another-pass",
                "division_id": division.id,
                "name": "Duplicate"
            }),
            &[("authorization", &format!("Bearer {}", jwt))],
        )
        .await;
    assert_error_body(
        response,
        StatusCode::CONFLICT,
        "An admin with this phone number already exists",
    )
    .await;
}

#[tokio::test]
async fn test_division_admin_cannot_manage_admins() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "secret123").await;
    let token = app
        .tokens
        .issue(admin.id, admin.user_id, admin.division_id)
        .unwrap();

    let response = app.get("/admin/admins", &[("x-admin-token", token.as_str())]).await;
    assert_error_body(response, StatusCode::FORBIDDEN, "Super admin access required").await;
}

#[tokio::test]
async fn test_deactivate_and_reactivate_admin() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "secret123").await;
    let (_, jwt) = app.seed_super_admin().await;
    let bearer = format!("Bearer {}", jwt);

    let response = app
        .patch_json(
            &format!("/admin/admins/{}", admin.id),
            serde_json::json!({ "is_active": false }),
            &[("authorization", bearer.as_str())],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.login("9876543210", "secret123").await;
    assert_error_body(
        response,
        StatusCode::UNAUTHORIZED,
        "Your account has been deactivated. Contact Super Admin.",
    )
    .await;

    let response = app
        .patch_json(
            &format!("/admin/admins/{}", admin.id),
            serde_json::json!({ "is_active": true }),
            &[("authorization", bearer.as_str())],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.login("9876543210", "secret123").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_password_reset() {
    let app = TestApp::spawn();
    let division = app.seed_division("Kollam").await;
    let admin = app.seed_admin(division.id, "9876543210", "old-secret").await;
    let (_, jwt) = app.seed_super_admin().await;

    let response = app
        .patch_json(
            &format!("/admin/admins/{}", admin.id),
            serde_json::json!({ "password": "new-secret" }),
            &[("authorization", &format!("Bearer {}", jwt))],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.login("9876543210", "old-secret").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.login("9876543210", "new-secret").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_super_admin_creates_division_and_panchayath() {
    let app = TestApp::spawn();
    let (_, jwt) = app.seed_super_admin().await;
    let bearer = format!("Bearer {}", jwt);

    let response = app
        .post_json(
            "/admin/divisions",
            serde_json::json!({ "name": "Palakkad", "description": "Northern unit" }),
            &[("authorization", bearer.as_str())],
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let division = body_json(response).await;

    let response = app
        .post_json(
            "/admin/panchayaths",
            serde_json::json!({
                "division_id": division["id"],
                "name": "Alathur"
            }),
            &[("authorization", bearer.as_str())],
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Both appear on the public endpoints
    let response = app.get("/divisions", &[]).await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = app
        .get(
            &format!("/divisions/{}/panchayaths", division["id"].as_str().unwrap()),
            &[],
        )
        .await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Alathur");
}
