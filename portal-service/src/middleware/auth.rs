//! Request authentication contexts and extractors.
//!
//! Two credential kinds arrive at admin routes: the portal's own signed
//! admin token in `x-admin-token`, and an identity-provider JWT as a
//! Bearer `Authorization` header. Extraction validates whichever is
//! present (admin token wins when both are) and hands handlers a typed
//! context, so no handler re-implements token checking.

use axum::{extract::FromRequestParts, http::request::Parts};
use portal_core::error::AppError;
use uuid::Uuid;

use crate::{
    models::RoleSet,
    services::ServiceError,
    AppState,
};

/// Header carrying the portal-issued admin token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// A division admin authenticated via the portal's own token.
///
/// `division_id` is re-read from the admin row on every request, so a
/// reassignment takes effect immediately rather than at next login.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin_id: Uuid,
    pub user_id: Uuid,
    pub division_id: Uuid,
}

/// A user authenticated via the identity provider, with roles loaded
/// from the role table.
#[derive(Debug, Clone)]
pub struct IdentityContext {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub roles: RoleSet,
}

/// The authenticated caller of an admin route.
#[derive(Debug, Clone)]
pub enum AuthContext {
    DivisionAdmin(AdminContext),
    Identity(IdentityContext),
}

impl AuthContext {
    pub fn is_super_admin(&self) -> bool {
        match self {
            AuthContext::DivisionAdmin(_) => false,
            AuthContext::Identity(ctx) => ctx.roles.is_super_admin(),
        }
    }

    /// The division this caller administers, if they are scoped to one.
    pub fn division_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::DivisionAdmin(ctx) => Some(ctx.division_id),
            AuthContext::Identity(_) => None,
        }
    }

    pub fn user_id(&self) -> Uuid {
        match self {
            AuthContext::DivisionAdmin(ctx) => ctx.user_id,
            AuthContext::Identity(ctx) => ctx.user_id,
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(value) = parts.headers.get(ADMIN_TOKEN_HEADER) {
            let token = value
                .to_str()
                .map_err(|_| AppError::from(ServiceError::InvalidToken))?;
            let ctx = state.auth_service.validate_token(token).await?;
            return Ok(AuthContext::DivisionAdmin(ctx));
        }

        if let Some(token) = bearer_token(parts) {
            let user = state.identity.verify(token)?;
            let roles = state
                .store
                .roles_for_user(user.user_id)
                .await
                .map_err(ServiceError::from)?;
            return Ok(AuthContext::Identity(IdentityContext {
                user_id: user.user_id,
                email: user.email,
                roles: roles.into_iter().collect(),
            }));
        }

        Err(ServiceError::MissingToken.into())
    }
}

/// Extractor that additionally requires the super admin role.
#[derive(Debug, Clone)]
pub struct SuperAdminContext(pub IdentityContext);

#[axum::async_trait]
impl FromRequestParts<AppState> for SuperAdminContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthContext::from_request_parts(parts, state).await? {
            AuthContext::Identity(ctx) if ctx.roles.is_super_admin() => {
                Ok(SuperAdminContext(ctx))
            }
            _ => Err(ServiceError::Forbidden("Super admin access required".to_string()).into()),
        }
    }
}
