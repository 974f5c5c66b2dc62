pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
pub mod utils;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use portal_core::error::AppError;
use portal_core::middleware::{
    rate_limit::{ip_rate_limit_middleware, IpRateLimiter},
    security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::PortalConfig;
use crate::services::{
    AdminManagementService, AuthService, IdentityProvider, MemberService, ProgramService,
};
use crate::store::PortalStore;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        handlers::auth::admin_login,
        handlers::programs::program_action,
        handlers::programs::list_division_programs,
        handlers::programs::list_registrations,
        handlers::members::create_member,
        handlers::members::list_members,
        handlers::admin::create_admin,
        handlers::admin::list_admins,
        handlers::admin::update_admin,
        handlers::admin::create_division,
        handlers::admin::create_panchayath,
        handlers::admin::create_cluster,
        handlers::public::list_programs,
        handlers::public::register,
        handlers::public::list_divisions,
        handlers::public::list_panchayaths,
        handlers::public::list_clusters,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::AdminLoginRequest,
            dtos::AdminLoginResponse,
            dtos::AdminInfo,
            dtos::ProgramActionRequest,
            dtos::ProgramPayload,
            dtos::program::ProgramActionResponse,
            dtos::CreateMemberRequest,
            dtos::CreateAdminRequest,
            dtos::UpdateAdminRequest,
            dtos::CreateDivisionRequest,
            dtos::CreatePanchayathRequest,
            dtos::CreateClusterRequest,
            dtos::PublicRegistrationRequest,
            dtos::RegistrationResponse,
            dtos::RegistrationsResponse,
            models::AdminDescriptor,
            models::AdminResponse,
            models::Division,
            models::Panchayath,
            models::Cluster,
            models::Member,
            models::Program,
            models::Registration,
            models::AppRole,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Division admin login"),
        (name = "Programs", description = "Program management and registrations"),
        (name = "Members", description = "Member rolls"),
        (name = "Administration", description = "Super-admin operations"),
        (name = "Public", description = "Unauthenticated portal data"),
        (name = "Observability", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "admin_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    middleware::ADMIN_TOKEN_HEADER,
                ))),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: PortalConfig,
    pub store: Arc<dyn PortalStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub auth_service: AuthService,
    pub program_service: ProgramService,
    pub member_service: MemberService,
    pub admin_service: AdminManagementService,
    pub login_rate_limiter: IpRateLimiter,
    pub ip_rate_limiter: IpRateLimiter,
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    // Login gets its own, tighter limiter
    let login_limiter = state.login_rate_limiter.clone();
    let login_route = Router::new()
        .route("/admin/auth", post(handlers::auth::admin_login))
        .layer(from_fn_with_state(login_limiter, ip_rate_limit_middleware));

    let admin_routes = Router::new()
        .route(
            "/admin/programs",
            get(handlers::programs::list_division_programs)
                .post(handlers::programs::program_action),
        )
        .route(
            "/admin/registrations",
            get(handlers::programs::list_registrations),
        )
        .route(
            "/admin/members",
            get(handlers::members::list_members).post(handlers::members::create_member),
        )
        .route(
            "/admin/admins",
            get(handlers::admin::list_admins).post(handlers::admin::create_admin),
        )
        .route("/admin/admins/:id", patch(handlers::admin::update_admin))
        .route("/admin/divisions", post(handlers::admin::create_division))
        .route(
            "/admin/panchayaths",
            post(handlers::admin::create_panchayath),
        )
        .route("/admin/clusters", post(handlers::admin::create_cluster));

    let ip_limiter = state.ip_rate_limiter.clone();

    let mut app = Router::new().route("/health", get(health_check));

    if state.config.swagger.enabled {
        app =
            app.merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()));
    } else {
        app = app.route(
            "/.well-known/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        );
    }

    let app = app
        .route("/programs", get(handlers::public::list_programs))
        .route(
            "/programs/:id/registrations",
            post(handlers::public::register),
        )
        .route("/divisions", get(handlers::public::list_divisions))
        .route(
            "/divisions/:id/panchayaths",
            get(handlers::public::list_panchayaths),
        )
        .route(
            "/panchayaths/:id/clusters",
            get(handlers::public::list_clusters),
        )
        .merge(login_route)
        .merge(admin_routes)
        .with_state(state.clone())
        .layer(from_fn_with_state(ip_limiter, ip_rate_limit_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(
                    state
                        .config
                        .security
                        .allowed_origins
                        .iter()
                        .map(|o| {
                            o.parse::<HeaderValue>().unwrap_or_else(|e| {
                                tracing::error!(
                                    "Invalid CORS origin '{}': {}. Using fallback.",
                                    o,
                                    e
                                );
                                HeaderValue::from_static("http://localhost:3000")
                            })
                        })
                        .collect::<Vec<HeaderValue>>(),
                )
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::AUTHORIZATION,
                    header::CONTENT_TYPE,
                    header::HeaderName::from_static(middleware::ADMIN_TOKEN_HEADER),
                ]),
        );

    Ok(app)
}

/// Service health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Service is unhealthy")
    ),
    tag = "Observability"
)]
pub async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::Json<serde_json::Value>, AppError> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Database health check failed");
        AppError::DatabaseError(anyhow::Error::new(e))
    })?;

    Ok(axum::Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "database": "up"
        }
    })))
}
