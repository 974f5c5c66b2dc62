use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Registration;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PublicRegistrationRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub member_name: String,
    #[validate(length(min = 7, max = 20, message = "A valid phone number is required"))]
    pub phone: String,
    pub panchayath_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub success: bool,
    pub registration: Registration,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationsResponse {
    pub registrations: Vec<Registration>,
}
