//! Persistence layer behind a trait so handlers and services stay
//! storage-agnostic. Production uses PostgreSQL; tests use the in-memory
//! implementation.

pub mod memory;
pub mod postgres;

use crate::models::{
    Admin, AppRole, Cluster, Division, Member, Panchayath, Profile, Program, Registration,
};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Internal(String),
}

#[async_trait]
pub trait PortalStore: Send + Sync {
    // Admins
    async fn find_admin_by_phone(&self, phone: &str) -> Result<Option<Admin>, StoreError>;
    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError>;
    async fn insert_admin(&self, admin: &Admin) -> Result<(), StoreError>;
    async fn list_admins(&self) -> Result<Vec<Admin>, StoreError>;
    /// Returns false when no admin matched.
    async fn set_admin_active(&self, id: Uuid, active: bool) -> Result<bool, StoreError>;
    async fn set_admin_password(&self, id: Uuid, password_hash: &str) -> Result<bool, StoreError>;

    // Profiles and roles
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;
    async fn insert_profile(&self, profile: &Profile) -> Result<(), StoreError>;
    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<AppRole>, StoreError>;
    async fn insert_user_role(&self, user_id: Uuid, role: AppRole) -> Result<(), StoreError>;

    // Divisions and local units
    async fn list_divisions(&self) -> Result<Vec<Division>, StoreError>;
    async fn find_division(&self, id: Uuid) -> Result<Option<Division>, StoreError>;
    async fn insert_division(&self, division: &Division) -> Result<(), StoreError>;
    async fn list_panchayaths(&self, division_id: Uuid) -> Result<Vec<Panchayath>, StoreError>;
    async fn insert_panchayath(&self, panchayath: &Panchayath) -> Result<(), StoreError>;
    async fn list_clusters(&self, panchayath_id: Uuid) -> Result<Vec<Cluster>, StoreError>;
    async fn insert_cluster(&self, cluster: &Cluster) -> Result<(), StoreError>;

    // Programs
    async fn insert_program(&self, program: &Program) -> Result<(), StoreError>;
    async fn find_program(&self, id: Uuid) -> Result<Option<Program>, StoreError>;
    /// Writes all mutable columns; returns false when no program matched.
    async fn update_program(&self, program: &Program) -> Result<bool, StoreError>;
    async fn delete_program(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn list_active_programs(&self) -> Result<Vec<Program>, StoreError>;
    async fn list_programs_by_division(&self, division_id: Uuid)
        -> Result<Vec<Program>, StoreError>;

    // Members
    async fn insert_member(&self, member: &Member) -> Result<(), StoreError>;
    async fn list_members_by_division(&self, division_id: Uuid)
        -> Result<Vec<Member>, StoreError>;

    // Registrations
    async fn insert_registration(&self, registration: &Registration) -> Result<(), StoreError>;
    /// Newest first.
    async fn list_registrations_by_program(
        &self,
        program_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
