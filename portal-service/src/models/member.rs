use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Division-scoped member record.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Member {
    pub id: Uuid,
    pub division_id: Uuid,
    pub panchayath_id: Option<Uuid>,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        division_id: Uuid,
        panchayath_id: Option<Uuid>,
        name: String,
        phone: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            division_id,
            panchayath_id,
            name,
            phone,
            created_at: Utc::now(),
        }
    }
}
