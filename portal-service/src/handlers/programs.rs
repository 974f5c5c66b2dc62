//! Program management and registration listing handlers.

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
    dtos::{ProgramActionRequest, RegistrationsResponse},
    middleware::AuthContext,
    utils::ValidatedJson,
    AppState,
};

/// Create, update or delete a program
#[utoipa::path(
    post,
    path = "/admin/programs",
    request_body = ProgramActionRequest,
    responses(
        (status = 200, description = "Action applied", body = ProgramActionResponse),
        (status = 400, description = "Unknown action or missing fields", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Program outside caller's division", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Programs",
    security(("admin_token" = []), ("bearer_auth" = []))
)]
pub async fn program_action(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidatedJson(req): ValidatedJson<ProgramActionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.program_service.handle_action(&ctx, req).await?;
    Ok((StatusCode::OK, Json(res)))
}

#[derive(Debug, Deserialize)]
pub struct DivisionProgramsQuery {
    pub division_id: Option<Uuid>,
}

/// List programs of a division, including inactive ones
#[utoipa::path(
    get,
    path = "/admin/programs",
    params(("division_id" = Option<Uuid>, Query, description = "Division filter; defaults to the caller's division")),
    responses(
        (status = 200, description = "Programs, newest first", body = [Program]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Division outside caller's scope", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Programs",
    security(("admin_token" = []), ("bearer_auth" = []))
)]
pub async fn list_division_programs(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<DivisionProgramsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let programs = state
        .program_service
        .list_division_programs(&ctx, query.division_id)
        .await?;
    Ok((StatusCode::OK, Json(programs)))
}

#[derive(Debug, Deserialize)]
pub struct RegistrationsQuery {
    pub program_id: Uuid,
}

/// List registrations for a program in the caller's division
#[utoipa::path(
    get,
    path = "/admin/registrations",
    params(("program_id" = Uuid, Query, description = "Program to list registrations for")),
    responses(
        (status = 200, description = "Registrations, newest first", body = RegistrationsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Program outside caller's division", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Programs",
    security(("admin_token" = []), ("bearer_auth" = []))
)]
pub async fn list_registrations(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<RegistrationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let registrations = state
        .program_service
        .registrations_for(&ctx, query.program_id)
        .await?;
    Ok((
        StatusCode::OK,
        Json(RegistrationsResponse { registrations }),
    ))
}
