use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Admin;

/// Login request. Fields are optional so that missing credentials can be
/// answered with the dedicated message instead of a deserialize failure.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminLoginRequest {
    /// Only `login` is accepted; anything else is rejected.
    pub action: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminInfo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub division_id: Uuid,
    pub phone: String,
    pub email: Option<String>,
}

impl AdminInfo {
    pub fn from_admin(admin: &Admin, email: Option<String>) -> Self {
        Self {
            id: admin.id,
            user_id: admin.user_id,
            division_id: admin.division_id,
            phone: admin.phone.clone(),
            email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: String,
    pub admin: AdminInfo,
}
