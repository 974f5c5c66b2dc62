//! Admin login and per-request token validation.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    middleware::AdminContext,
    models::Admin,
    services::{token::AdminTokenService, ServiceError},
    store::PortalStore,
    utils::{normalize_phone, verify_password, Password, PasswordHashString},
};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub admin: Admin,
    pub email: Option<String>,
}

/// Verifies admin credentials and validates portal-issued tokens.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn PortalStore>,
    tokens: AdminTokenService,
}

impl AuthService {
    pub fn new(store: Arc<dyn PortalStore>, tokens: AdminTokenService) -> Self {
        Self { store, tokens }
    }

    /// Authenticate a division admin by phone and password.
    ///
    /// Unknown phone and wrong password both surface as
    /// `InvalidCredentials`. Deactivated and unprovisioned accounts get
    /// their own messages; at that point the phone already matched, so
    /// nothing new is disclosed.
    pub async fn login(
        &self,
        phone: Option<String>,
        password: Option<String>,
    ) -> Result<LoginOutcome, ServiceError> {
        let (phone, password) = match (phone, password) {
            (Some(p), Some(w)) if !p.trim().is_empty() && !w.is_empty() => (p, w),
            _ => return Err(ServiceError::MissingCredentials),
        };

        let phone = normalize_phone(&phone);
        let admin = self
            .store
            .find_admin_by_phone(&phone)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !admin.is_active {
            warn!(admin_id = %admin.id, "login attempt on deactivated admin account");
            return Err(ServiceError::AccountDisabled);
        }

        let stored = admin
            .password_hash
            .clone()
            .ok_or(ServiceError::NotProvisioned)?;

        verify_password(&Password::new(password), &PasswordHashString::new(stored))
            .map_err(|_| ServiceError::InvalidCredentials)?;

        let token = self
            .tokens
            .issue(admin.id, admin.user_id, admin.division_id)?;

        // Email enrichment is best-effort; a missing profile must not
        // fail an otherwise valid login.
        let email = match self.store.find_profile(admin.user_id).await {
            Ok(profile) => profile.map(|p| p.email),
            Err(e) => {
                warn!(user_id = %admin.user_id, error = %e, "profile lookup failed during login");
                None
            }
        };

        info!(admin_id = %admin.id, division_id = %admin.division_id, "admin login succeeded");

        Ok(LoginOutcome {
            token,
            admin,
            email,
        })
    }

    /// Validate a portal-issued admin token and re-check account status.
    ///
    /// The division id comes from the current admin row, not the token,
    /// so reassignment and deactivation apply to outstanding tokens.
    pub async fn validate_token(&self, token: &str) -> Result<AdminContext, ServiceError> {
        let claims = self.tokens.decode(token)?;

        let admin = self
            .store
            .find_admin_by_id(claims.admin_id)
            .await?
            .ok_or(ServiceError::AccountNotFound)?;

        if !admin.is_active {
            return Err(ServiceError::AccountDisabled);
        }

        Ok(AdminContext {
            admin_id: admin.id,
            user_id: admin.user_id,
            division_id: admin.division_id,
        })
    }
}
