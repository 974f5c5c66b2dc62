//! Admin model - division-scoped administrators with phone+password credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Division admin entity.
///
/// Admins are soft-disabled via `is_active`, never hard-deleted.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: Uuid,
    /// Linked identity-provider user (profile row).
    pub user_id: Uuid,
    pub division_id: Uuid,
    /// Login handle, unique, stored with whitespace stripped.
    pub phone: String,
    /// Hex SHA-256 digest; None until provisioned by a super admin.
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(user_id: Uuid, division_id: Uuid, phone: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            division_id,
            phone,
            password_hash: Some(password_hash),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn descriptor(&self) -> AdminDescriptor {
        AdminDescriptor {
            id: self.id,
            user_id: self.user_id,
            division_id: self.division_id,
        }
    }

    /// Convert to sanitized response (no credential fields).
    pub fn sanitized(&self) -> AdminResponse {
        AdminResponse {
            id: self.id,
            user_id: self.user_id,
            division_id: self.division_id,
            phone: self.phone.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Minimal admin descriptor returned at login and persisted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminDescriptor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub division_id: Uuid,
}

/// Admin response for management APIs (without the password hash).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub division_id: Uuid,
    pub phone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
