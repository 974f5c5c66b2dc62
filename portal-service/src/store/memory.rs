//! In-memory store used by integration tests, mirroring the PostgreSQL
//! implementation's observable behavior.

use super::{PortalStore, StoreError};
use crate::models::{
    Admin, AppRole, Cluster, Division, Member, Panchayath, Profile, Program, Registration,
};
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    admins: DashMap<Uuid, Admin>,
    profiles: DashMap<Uuid, Profile>,
    roles: DashMap<Uuid, Vec<AppRole>>,
    divisions: DashMap<Uuid, Division>,
    panchayaths: DashMap<Uuid, Panchayath>,
    clusters: DashMap<Uuid, Cluster>,
    programs: DashMap<Uuid, Program>,
    members: DashMap<Uuid, Member>,
    registrations: DashMap<Uuid, Registration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortalStore for MemoryStore {
    async fn find_admin_by_phone(&self, phone: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self
            .admins
            .iter()
            .find(|entry| entry.value().phone == phone)
            .map(|entry| entry.value().clone()))
    }

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        Ok(self.admins.get(&id).map(|a| a.value().clone()))
    }

    async fn insert_admin(&self, admin: &Admin) -> Result<(), StoreError> {
        self.admins.insert(admin.id, admin.clone());
        Ok(())
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, StoreError> {
        let mut admins: Vec<Admin> = self.admins.iter().map(|e| e.value().clone()).collect();
        admins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(admins)
    }

    async fn set_admin_active(&self, id: Uuid, active: bool) -> Result<bool, StoreError> {
        match self.admins.get_mut(&id) {
            Some(mut admin) => {
                admin.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_admin_password(&self, id: Uuid, password_hash: &str) -> Result<bool, StoreError> {
        match self.admins.get_mut(&id) {
            Some(mut admin) => {
                admin.password_hash = Some(password_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.get(&user_id).map(|p| p.value().clone()))
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<AppRole>, StoreError> {
        Ok(self
            .roles
            .get(&user_id)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }

    async fn insert_user_role(&self, user_id: Uuid, role: AppRole) -> Result<(), StoreError> {
        let mut roles = self.roles.entry(user_id).or_default();
        if !roles.contains(&role) {
            roles.push(role);
        }
        Ok(())
    }

    async fn list_divisions(&self) -> Result<Vec<Division>, StoreError> {
        let mut divisions: Vec<Division> =
            self.divisions.iter().map(|e| e.value().clone()).collect();
        divisions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(divisions)
    }

    async fn find_division(&self, id: Uuid) -> Result<Option<Division>, StoreError> {
        Ok(self.divisions.get(&id).map(|d| d.value().clone()))
    }

    async fn insert_division(&self, division: &Division) -> Result<(), StoreError> {
        self.divisions.insert(division.id, division.clone());
        Ok(())
    }

    async fn list_panchayaths(&self, division_id: Uuid) -> Result<Vec<Panchayath>, StoreError> {
        let mut panchayaths: Vec<Panchayath> = self
            .panchayaths
            .iter()
            .filter(|e| e.value().division_id == division_id)
            .map(|e| e.value().clone())
            .collect();
        panchayaths.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(panchayaths)
    }

    async fn insert_panchayath(&self, panchayath: &Panchayath) -> Result<(), StoreError> {
        self.panchayaths.insert(panchayath.id, panchayath.clone());
        Ok(())
    }

    async fn list_clusters(&self, panchayath_id: Uuid) -> Result<Vec<Cluster>, StoreError> {
        let mut clusters: Vec<Cluster> = self
            .clusters
            .iter()
            .filter(|e| e.value().panchayath_id == panchayath_id)
            .map(|e| e.value().clone())
            .collect();
        clusters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clusters)
    }

    async fn insert_cluster(&self, cluster: &Cluster) -> Result<(), StoreError> {
        self.clusters.insert(cluster.id, cluster.clone());
        Ok(())
    }

    async fn insert_program(&self, program: &Program) -> Result<(), StoreError> {
        self.programs.insert(program.id, program.clone());
        Ok(())
    }

    async fn find_program(&self, id: Uuid) -> Result<Option<Program>, StoreError> {
        Ok(self.programs.get(&id).map(|p| p.value().clone()))
    }

    async fn update_program(&self, program: &Program) -> Result<bool, StoreError> {
        match self.programs.get_mut(&program.id) {
            Some(mut existing) => {
                *existing = program.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_program(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.programs.remove(&id).is_some())
    }

    async fn list_active_programs(&self) -> Result<Vec<Program>, StoreError> {
        let mut programs: Vec<Program> = self
            .programs
            .iter()
            .filter(|e| e.value().is_active)
            .map(|e| e.value().clone())
            .collect();
        programs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(programs)
    }

    async fn list_programs_by_division(
        &self,
        division_id: Uuid,
    ) -> Result<Vec<Program>, StoreError> {
        let mut programs: Vec<Program> = self
            .programs
            .iter()
            .filter(|e| e.value().division_id == division_id)
            .map(|e| e.value().clone())
            .collect();
        programs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(programs)
    }

    async fn insert_member(&self, member: &Member) -> Result<(), StoreError> {
        self.members.insert(member.id, member.clone());
        Ok(())
    }

    async fn list_members_by_division(
        &self,
        division_id: Uuid,
    ) -> Result<Vec<Member>, StoreError> {
        let mut members: Vec<Member> = self
            .members
            .iter()
            .filter(|e| e.value().division_id == division_id)
            .map(|e| e.value().clone())
            .collect();
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(members)
    }

    async fn insert_registration(&self, registration: &Registration) -> Result<(), StoreError> {
        self.registrations
            .insert(registration.id, registration.clone());
        Ok(())
    }

    async fn list_registrations_by_program(
        &self,
        program_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError> {
        let mut registrations: Vec<Registration> = self
            .registrations
            .iter()
            .filter(|e| e.value().program_id == program_id)
            .map(|e| e.value().clone())
            .collect();
        registrations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(registrations)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
