//! Admin authentication handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use portal_core::error::AppError;

use crate::{
    dtos::{AdminInfo, AdminLoginRequest, AdminLoginResponse},
    services::ServiceError,
    utils::ValidatedJson,
    AppState,
};

/// Division admin login with phone and password
#[utoipa::path(
    post,
    path = "/admin/auth",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminLoginResponse),
        (status = 400, description = "Missing credentials or unknown action", body = ErrorResponse),
        (status = 401, description = "Invalid credentials or account unavailable", body = ErrorResponse),
        (status = 429, description = "Too many attempts", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AdminLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    match req.action.as_deref() {
        None | Some("login") => {}
        Some(_) => return Err(ServiceError::InvalidAction.into()),
    }

    let outcome = state.auth_service.login(req.phone, req.password).await?;

    let res = AdminLoginResponse {
        success: true,
        token: outcome.token,
        admin: AdminInfo::from_admin(&outcome.admin, outcome.email),
    };
    Ok((StatusCode::OK, Json(res)))
}
