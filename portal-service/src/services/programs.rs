//! Program management and registration listing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    dtos::{ProgramActionRequest, ProgramActionResponse, ProgramPayload},
    middleware::AuthContext,
    models::{Program, ProgramChanges, Registration},
    services::{
        policy::{authorize_division, effective_division},
        ServiceError,
    },
    store::PortalStore,
};

#[derive(Clone)]
pub struct ProgramService {
    store: Arc<dyn PortalStore>,
}

impl ProgramService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    /// Dispatch a program management request on its `action` field.
    pub async fn handle_action(
        &self,
        ctx: &AuthContext,
        req: ProgramActionRequest,
    ) -> Result<ProgramActionResponse, ServiceError> {
        let data = req.data.unwrap_or_default();
        match req.action.as_deref() {
            Some("create") => {
                let program = self.create(ctx, data).await?;
                Ok(ProgramActionResponse::with_program(program))
            }
            Some("update") => {
                let program = self.update(ctx, data).await?;
                Ok(ProgramActionResponse::with_program(program))
            }
            Some("delete") => {
                self.delete(ctx, data.id).await?;
                Ok(ProgramActionResponse::ok())
            }
            _ => Err(ServiceError::InvalidAction),
        }
    }

    async fn create(
        &self,
        ctx: &AuthContext,
        data: ProgramPayload,
    ) -> Result<Program, ServiceError> {
        let name = data
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ServiceError::Validation("Program name is required".to_string()))?;

        let division_id = effective_division(ctx, data.division_id)?;
        authorize_division(
            ctx,
            division_id,
            "You can only create programs for your division",
        )?;

        let program = Program::new(
            division_id,
            data.panchayath_id,
            data.all_panchayaths.unwrap_or(false),
            name,
            data.description,
            data.start_date,
            data.end_date,
            ctx.user_id(),
        );
        self.store.insert_program(&program).await?;

        info!(program_id = %program.id, division_id = %division_id, "program created");
        Ok(program)
    }

    async fn update(
        &self,
        ctx: &AuthContext,
        data: ProgramPayload,
    ) -> Result<Program, ServiceError> {
        let id = data
            .id
            .ok_or_else(|| ServiceError::Validation("Program id is required".to_string()))?;

        let mut program = self
            .store
            .find_program(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Program not found".to_string()))?;

        authorize_division(
            ctx,
            program.division_id,
            "You can only update programs in your division",
        )?;

        program.apply(&ProgramChanges {
            name: data.name,
            description: data.description,
            is_active: data.is_active,
            start_date: data.start_date,
            end_date: data.end_date,
            all_panchayaths: data.all_panchayaths,
            panchayath_id: data.panchayath_id,
        });

        if !self.store.update_program(&program).await? {
            return Err(ServiceError::NotFound("Program not found".to_string()));
        }

        info!(program_id = %program.id, "program updated");
        Ok(program)
    }

    async fn delete(&self, ctx: &AuthContext, id: Option<Uuid>) -> Result<(), ServiceError> {
        let id =
            id.ok_or_else(|| ServiceError::Validation("Program id is required".to_string()))?;

        let program = self
            .store
            .find_program(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Program not found".to_string()))?;

        authorize_division(
            ctx,
            program.division_id,
            "You can only delete programs in your division",
        )?;

        if !self.store.delete_program(id).await? {
            return Err(ServiceError::NotFound("Program not found".to_string()));
        }

        info!(program_id = %id, "program deleted");
        Ok(())
    }

    /// Active programs, for the public portal.
    pub async fn list_active(&self) -> Result<Vec<Program>, ServiceError> {
        Ok(self.store.list_active_programs().await?)
    }

    /// All programs of a division, active or not, for the admin dashboard.
    pub async fn list_division_programs(
        &self,
        ctx: &AuthContext,
        division_id: Option<Uuid>,
    ) -> Result<Vec<Program>, ServiceError> {
        let division_id = effective_division(ctx, division_id)?;
        authorize_division(
            ctx,
            division_id,
            "You can only view programs in your division",
        )?;

        Ok(self.store.list_programs_by_division(division_id).await?)
    }

    /// Registrations for a program the caller is allowed to see.
    pub async fn registrations_for(
        &self,
        ctx: &AuthContext,
        program_id: Uuid,
    ) -> Result<Vec<Registration>, ServiceError> {
        let program = self
            .store
            .find_program(program_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Program not found".to_string()))?;

        authorize_division(
            ctx,
            program.division_id,
            "Access denied: Program belongs to different division",
        )?;

        Ok(self.store.list_registrations_by_program(program_id).await?)
    }
}
