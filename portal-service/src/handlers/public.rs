//! Unauthenticated portal handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use portal_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::{PublicRegistrationRequest, RegistrationResponse},
    utils::ValidatedJson,
    AppState,
};

/// List active programs
#[utoipa::path(
    get,
    path = "/programs",
    responses(
        (status = 200, description = "Active programs, newest first", body = [Program]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Public"
)]
pub async fn list_programs(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let programs = state.program_service.list_active().await?;
    Ok((StatusCode::OK, Json(programs)))
}

/// Register for an active program
#[utoipa::path(
    post,
    path = "/programs/{id}/registrations",
    params(("id" = Uuid, Path, description = "Program id")),
    request_body = PublicRegistrationRequest,
    responses(
        (status = 201, description = "Registration recorded", body = RegistrationResponse),
        (status = 400, description = "Program not accepting registrations", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Public"
)]
pub async fn register(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<PublicRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registration = state.member_service.register(id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            success: true,
            registration,
        }),
    ))
}

/// List divisions
#[utoipa::path(
    get,
    path = "/divisions",
    responses(
        (status = 200, description = "All divisions", body = [Division]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Public"
)]
pub async fn list_divisions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let divisions = state.store.list_divisions().await.map_err(|e| {
        AppError::DatabaseError(anyhow::Error::new(e))
    })?;
    Ok((StatusCode::OK, Json(divisions)))
}

/// List panchayaths of a division
#[utoipa::path(
    get,
    path = "/divisions/{id}/panchayaths",
    params(("id" = Uuid, Path, description = "Division id")),
    responses(
        (status = 200, description = "Panchayaths of the division", body = [Panchayath]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Public"
)]
pub async fn list_panchayaths(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let panchayaths = state.store.list_panchayaths(id).await.map_err(|e| {
        AppError::DatabaseError(anyhow::Error::new(e))
    })?;
    Ok((StatusCode::OK, Json(panchayaths)))
}

/// List clusters of a panchayath
#[utoipa::path(
    get,
    path = "/panchayaths/{id}/clusters",
    params(("id" = Uuid, Path, description = "Panchayath id")),
    responses(
        (status = 200, description = "Clusters of the panchayath", body = [Cluster]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Public"
)]
pub async fn list_clusters(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let clusters = state.store.list_clusters(id).await.map_err(|e| {
        AppError::DatabaseError(anyhow::Error::new(e))
    })?;
    Ok((StatusCode::OK, Json(clusters)))
}
