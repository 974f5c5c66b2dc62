//! Member roll handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use portal_core::error::AppError;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    dtos::CreateMemberRequest, middleware::AuthContext, utils::ValidatedJson, AppState,
};

/// Add a member to a division
#[utoipa::path(
    post,
    path = "/admin/members",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member added", body = Member),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Division outside caller's scope", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Members",
    security(("admin_token" = []), ("bearer_auth" = []))
)]
pub async fn create_member(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidatedJson(req): ValidatedJson<CreateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let member = state.member_service.create_member(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[derive(Debug, Deserialize)]
pub struct MembersQuery {
    pub division_id: Option<Uuid>,
}

/// List members of a division
#[utoipa::path(
    get,
    path = "/admin/members",
    params(("division_id" = Option<Uuid>, Query, description = "Division filter; defaults to the caller's division")),
    responses(
        (status = 200, description = "Members, newest first", body = [Member]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Division outside caller's scope", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Members",
    security(("admin_token" = []), ("bearer_auth" = []))
)]
pub async fn list_members(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<MembersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let members = state
        .member_service
        .list_members(&ctx, query.division_id)
        .await?;
    Ok((StatusCode::OK, Json(members)))
}
