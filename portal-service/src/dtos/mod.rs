pub mod admin;
pub mod auth;
pub mod member;
pub mod program;
pub mod registration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use admin::{
    CreateAdminRequest, CreateClusterRequest, CreateDivisionRequest, CreatePanchayathRequest,
    UpdateAdminRequest,
};
pub use auth::{AdminInfo, AdminLoginRequest, AdminLoginResponse};
pub use member::CreateMemberRequest;
pub use program::{ProgramActionRequest, ProgramActionResponse, ProgramPayload};
pub use registration::{PublicRegistrationRequest, RegistrationResponse, RegistrationsResponse};

/// Uniform error body, a single `error` field.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
