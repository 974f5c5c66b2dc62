//! Super-admin management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use portal_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::{
        CreateAdminRequest, CreateClusterRequest, CreateDivisionRequest, CreatePanchayathRequest,
        UpdateAdminRequest,
    },
    middleware::SuperAdminContext,
    utils::ValidatedJson,
    AppState,
};

/// Provision a division admin
#[utoipa::path(
    post,
    path = "/admin/admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin provisioned", body = AdminResponse),
        (status = 403, description = "Super admin access required", body = ErrorResponse),
        (status = 404, description = "Division not found", body = ErrorResponse),
        (status = 409, description = "Phone number already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("bearer_auth" = []))
)]
pub async fn create_admin(
    State(state): State<AppState>,
    _ctx: SuperAdminContext,
    ValidatedJson(req): ValidatedJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state.admin_service.create_admin(req).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

/// List all division admins
#[utoipa::path(
    get,
    path = "/admin/admins",
    responses(
        (status = 200, description = "Admins without credential fields", body = [AdminResponse]),
        (status = 403, description = "Super admin access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("bearer_auth" = []))
)]
pub async fn list_admins(
    State(state): State<AppState>,
    _ctx: SuperAdminContext,
) -> Result<impl IntoResponse, AppError> {
    let admins = state.admin_service.list_admins().await?;
    Ok((StatusCode::OK, Json(admins)))
}

/// Activate, deactivate or reset the password of an admin
#[utoipa::path(
    patch,
    path = "/admin/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin id")),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Updated admin", body = AdminResponse),
        (status = 403, description = "Super admin access required", body = ErrorResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("bearer_auth" = []))
)]
pub async fn update_admin(
    State(state): State<AppState>,
    _ctx: SuperAdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state.admin_service.update_admin(id, req).await?;
    Ok((StatusCode::OK, Json(admin)))
}

/// Create a division
#[utoipa::path(
    post,
    path = "/admin/divisions",
    request_body = CreateDivisionRequest,
    responses(
        (status = 201, description = "Division created", body = Division),
        (status = 403, description = "Super admin access required", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("bearer_auth" = []))
)]
pub async fn create_division(
    State(state): State<AppState>,
    _ctx: SuperAdminContext,
    ValidatedJson(req): ValidatedJson<CreateDivisionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let division = state.admin_service.create_division(req).await?;
    Ok((StatusCode::CREATED, Json(division)))
}

/// Create a panchayath within a division
#[utoipa::path(
    post,
    path = "/admin/panchayaths",
    request_body = CreatePanchayathRequest,
    responses(
        (status = 201, description = "Panchayath created", body = Panchayath),
        (status = 403, description = "Super admin access required", body = ErrorResponse),
        (status = 404, description = "Division not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("bearer_auth" = []))
)]
pub async fn create_panchayath(
    State(state): State<AppState>,
    _ctx: SuperAdminContext,
    ValidatedJson(req): ValidatedJson<CreatePanchayathRequest>,
) -> Result<impl IntoResponse, AppError> {
    let panchayath = state.admin_service.create_panchayath(req).await?;
    Ok((StatusCode::CREATED, Json(panchayath)))
}

/// Create a cluster within a panchayath
#[utoipa::path(
    post,
    path = "/admin/clusters",
    request_body = CreateClusterRequest,
    responses(
        (status = 201, description = "Cluster created", body = Cluster),
        (status = 403, description = "Super admin access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Administration",
    security(("bearer_auth" = []))
)]
pub async fn create_cluster(
    State(state): State<AppState>,
    _ctx: SuperAdminContext,
    ValidatedJson(req): ValidatedJson<CreateClusterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cluster = state.admin_service.create_cluster(req).await?;
    Ok((StatusCode::CREATED, Json(cluster)))
}
