use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 7, max = 20, message = "A valid phone number is required"))]
    pub phone: String,
    pub panchayath_id: Option<Uuid>,
    /// Required for super admins; ignored for division admins, whose own
    /// division always applies.
    pub division_id: Option<Uuid>,
}
