//! Member rolls and public program registration.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    dtos::{CreateMemberRequest, PublicRegistrationRequest},
    middleware::AuthContext,
    models::{Member, Registration},
    services::{
        policy::{authorize_division, effective_division},
        ServiceError,
    },
    store::PortalStore,
    utils::normalize_phone,
};

#[derive(Clone)]
pub struct MemberService {
    store: Arc<dyn PortalStore>,
}

impl MemberService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn create_member(
        &self,
        ctx: &AuthContext,
        req: CreateMemberRequest,
    ) -> Result<Member, ServiceError> {
        let division_id = effective_division(ctx, req.division_id)?;
        authorize_division(
            ctx,
            division_id,
            "You can only add members in your division",
        )?;

        let member = Member::new(
            division_id,
            req.panchayath_id,
            req.name,
            normalize_phone(&req.phone),
        );
        self.store.insert_member(&member).await?;

        info!(member_id = %member.id, division_id = %division_id, "member added");
        Ok(member)
    }

    pub async fn list_members(
        &self,
        ctx: &AuthContext,
        division_id: Option<Uuid>,
    ) -> Result<Vec<Member>, ServiceError> {
        let division_id = effective_division(ctx, division_id)?;
        authorize_division(
            ctx,
            division_id,
            "You can only view members in your division",
        )?;

        Ok(self.store.list_members_by_division(division_id).await?)
    }

    /// Public, unauthenticated registration against an active program.
    pub async fn register(
        &self,
        program_id: Uuid,
        req: PublicRegistrationRequest,
    ) -> Result<Registration, ServiceError> {
        let program = self
            .store
            .find_program(program_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Program not found".to_string()))?;

        if !program.is_active {
            return Err(ServiceError::Validation(
                "Program is not accepting registrations".to_string(),
            ));
        }

        let registration = Registration::new(
            program_id,
            req.member_name,
            normalize_phone(&req.phone),
            req.panchayath_id,
        );
        self.store.insert_registration(&registration).await?;

        info!(registration_id = %registration.id, program_id = %program_id, "registration recorded");
        Ok(registration)
    }
}
