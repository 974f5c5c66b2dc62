use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Public registration against a program.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Registration {
    pub id: Uuid,
    pub program_id: Uuid,
    pub member_name: String,
    pub phone: String,
    pub panchayath_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(
        program_id: Uuid,
        member_name: String,
        phone: String,
        panchayath_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id,
            member_name,
            phone,
            panchayath_id,
            created_at: Utc::now(),
        }
    }
}
