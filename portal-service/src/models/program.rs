//! Program model - division-owned programs members can register for.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Program {
    pub id: Uuid,
    pub division_id: Uuid,
    /// Target panchayath; None when the program covers all panchayaths.
    pub panchayath_id: Option<Uuid>,
    pub all_panchayaths: bool,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Partial update to a program. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProgramChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub all_panchayaths: Option<bool>,
    pub panchayath_id: Option<Uuid>,
}

impl Program {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        division_id: Uuid,
        panchayath_id: Option<Uuid>,
        all_panchayaths: bool,
        name: String,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            division_id,
            // Invariant: an all-panchayath program has no specific target.
            panchayath_id: if all_panchayaths { None } else { panchayath_id },
            all_panchayaths,
            name,
            description,
            start_date,
            end_date,
            is_active: true,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, changes: &ProgramChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone());
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = changes.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(all_panchayaths) = changes.all_panchayaths {
            self.all_panchayaths = all_panchayaths;
            self.panchayath_id = if all_panchayaths {
                None
            } else {
                changes.panchayath_id
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_panchayaths_clears_target() {
        let program = Program::new(
            Uuid::new_v4(),
            Some(Uuid::new_v4()),
            true,
            "Literacy drive".to_string(),
            None,
            None,
            None,
            Uuid::new_v4(),
        );
        assert!(program.panchayath_id.is_none());
        assert!(program.all_panchayaths);
    }

    #[test]
    fn test_apply_switches_to_single_panchayath() {
        let mut program = Program::new(
            Uuid::new_v4(),
            None,
            true,
            "Skill camp".to_string(),
            None,
            None,
            None,
            Uuid::new_v4(),
        );
        let target = Uuid::new_v4();
        program.apply(&ProgramChanges {
            all_panchayaths: Some(false),
            panchayath_id: Some(target),
            ..Default::default()
        });
        assert!(!program.all_panchayaths);
        assert_eq!(program.panchayath_id, Some(target));
    }

    #[test]
    fn test_apply_leaves_unset_fields_alone() {
        let mut program = Program::new(
            Uuid::new_v4(),
            None,
            false,
            "Tailoring unit".to_string(),
            Some("Batch 1".to_string()),
            None,
            None,
            Uuid::new_v4(),
        );
        program.apply(&ProgramChanges {
            is_active: Some(false),
            ..Default::default()
        });
        assert_eq!(program.name, "Tailoring unit");
        assert_eq!(program.description.as_deref(), Some("Batch 1"));
        assert!(!program.is_active);
    }
}
