use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Program;

/// Program management request, dispatched on the `action` field.
///
/// Accepted actions are `create`, `update` and `delete`; unknown actions
/// are rejected without touching the payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProgramActionRequest {
    pub action: Option<String>,
    pub data: Option<ProgramPayload>,
}

/// Program fields as supplied by the client. All optional; each action
/// checks for the fields it needs.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProgramPayload {
    pub id: Option<Uuid>,
    pub division_id: Option<Uuid>,
    pub panchayath_id: Option<Uuid>,
    pub all_panchayaths: Option<bool>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgramActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
}

impl ProgramActionResponse {
    pub fn with_program(program: Program) -> Self {
        Self {
            success: true,
            program: Some(program),
        }
    }

    pub fn ok() -> Self {
        Self {
            success: true,
            program: None,
        }
    }
}
