//! Super-admin management of admins, divisions and local units.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    dtos::{
        CreateAdminRequest, CreateClusterRequest, CreateDivisionRequest, CreatePanchayathRequest,
        UpdateAdminRequest,
    },
    models::{Admin, AdminResponse, AppRole, Cluster, Division, Panchayath, Profile},
    services::ServiceError,
    store::PortalStore,
    utils::{hash_password, normalize_phone, Password},
};

#[derive(Clone)]
pub struct AdminManagementService {
    store: Arc<dyn PortalStore>,
}

impl AdminManagementService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    /// Provision a division admin: a profile row, the admin role and the
    /// admin record with a hashed credential.
    pub async fn create_admin(
        &self,
        req: CreateAdminRequest,
    ) -> Result<AdminResponse, ServiceError> {
        let phone = normalize_phone(&req.phone);

        if self.store.find_admin_by_phone(&phone).await?.is_some() {
            return Err(ServiceError::Conflict(
                "An admin with this phone number already exists".to_string(),
            ));
        }

        if self.store.find_division(req.division_id).await?.is_none() {
            return Err(ServiceError::NotFound("Division not found".to_string()));
        }

        let email = req
            .email
            .unwrap_or_else(|| format!("{}@portal.local", phone));
        let profile = Profile::new(email, Some(req.name));
        self.store.insert_profile(&profile).await?;
        self.store.insert_user_role(profile.id, AppRole::Admin).await?;

        let password_hash = hash_password(&Password::new(req.password));
        let admin = Admin::new(
            profile.id,
            req.division_id,
            phone,
            password_hash.into_string(),
        );
        self.store.insert_admin(&admin).await?;

        info!(admin_id = %admin.id, division_id = %admin.division_id, "admin provisioned");
        Ok(admin.sanitized())
    }

    pub async fn update_admin(
        &self,
        id: Uuid,
        req: UpdateAdminRequest,
    ) -> Result<AdminResponse, ServiceError> {
        if let Some(active) = req.is_active {
            if !self.store.set_admin_active(id, active).await? {
                return Err(ServiceError::NotFound("Admin not found".to_string()));
            }
            info!(admin_id = %id, active, "admin activation changed");
        }

        if let Some(password) = req.password {
            let hash = hash_password(&Password::new(password));
            if !self.store.set_admin_password(id, hash.as_str()).await? {
                return Err(ServiceError::NotFound("Admin not found".to_string()));
            }
            info!(admin_id = %id, "admin password reset");
        }

        let admin = self
            .store
            .find_admin_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Admin not found".to_string()))?;
        Ok(admin.sanitized())
    }

    pub async fn list_admins(&self) -> Result<Vec<AdminResponse>, ServiceError> {
        let admins = self.store.list_admins().await?;
        Ok(admins.iter().map(Admin::sanitized).collect())
    }

    pub async fn create_division(
        &self,
        req: CreateDivisionRequest,
    ) -> Result<Division, ServiceError> {
        let division = Division::new(req.name, req.description);
        self.store.insert_division(&division).await?;
        info!(division_id = %division.id, "division created");
        Ok(division)
    }

    pub async fn create_panchayath(
        &self,
        req: CreatePanchayathRequest,
    ) -> Result<Panchayath, ServiceError> {
        if self.store.find_division(req.division_id).await?.is_none() {
            return Err(ServiceError::NotFound("Division not found".to_string()));
        }
        let panchayath = Panchayath::new(req.division_id, req.name);
        self.store.insert_panchayath(&panchayath).await?;
        Ok(panchayath)
    }

    pub async fn create_cluster(
        &self,
        req: CreateClusterRequest,
    ) -> Result<Cluster, ServiceError> {
        let cluster = Cluster::new(req.panchayath_id, req.name);
        self.store.insert_cluster(&cluster).await?;
        Ok(cluster)
    }
}
