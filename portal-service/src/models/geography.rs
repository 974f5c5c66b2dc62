//! Local administrative units below a division.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Panchayath {
    pub id: Uuid,
    pub division_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Panchayath {
    pub fn new(division_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            division_id,
            name,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Cluster {
    pub id: Uuid,
    pub panchayath_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Cluster {
    pub fn new(panchayath_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            panchayath_id,
            name,
            created_at: Utc::now(),
        }
    }
}
