//! PostgreSQL implementation of the portal store.

use super::{PortalStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::{
    Admin, AppRole, Cluster, Division, Member, Panchayath, Profile, Program, Registration,
};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.url)
        .await?;

    tracing::info!("Successfully connected to PostgreSQL");

    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortalStore for PgStore {
    async fn find_admin_by_phone(&self, phone: &str) -> Result<Option<Admin>, StoreError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, user_id, division_id, phone, password_hash, is_active, created_at \
             FROM admins WHERE phone = $1",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, user_id, division_id, phone, password_hash, is_active, created_at \
             FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn insert_admin(&self, admin: &Admin) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO admins (id, user_id, division_id, phone, password_hash, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(admin.id)
        .bind(admin.user_id)
        .bind(admin.division_id)
        .bind(&admin.phone)
        .bind(&admin.password_hash)
        .bind(admin.is_active)
        .bind(admin.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, StoreError> {
        let admins = sqlx::query_as::<_, Admin>(
            "SELECT id, user_id, division_id, phone, password_hash, is_active, created_at \
             FROM admins ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(admins)
    }

    async fn set_admin_active(&self, id: Uuid, active: bool) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE admins SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_admin_password(&self, id: Uuid, password_hash: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, email, name, created_at FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO profiles (id, email, name, created_at) VALUES ($1, $2, $3, $4)")
            .bind(profile.id)
            .bind(&profile.email)
            .bind(&profile.name)
            .bind(profile.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<AppRole>, StoreError> {
        let rows =
            sqlx::query_scalar::<_, String>("SELECT role FROM user_roles WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .iter()
            .filter_map(|r| match AppRole::from_str(r) {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!(user_id = %user_id, "Skipping role row: {}", e);
                    None
                }
            })
            .collect())
    }

    async fn insert_user_role(&self, user_id: Uuid, role: AppRole) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) \
             ON CONFLICT (user_id, role) DO NOTHING",
        )
        .bind(user_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_divisions(&self) -> Result<Vec<Division>, StoreError> {
        let divisions = sqlx::query_as::<_, Division>(
            "SELECT id, name, description, created_at FROM divisions ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(divisions)
    }

    async fn find_division(&self, id: Uuid) -> Result<Option<Division>, StoreError> {
        let division = sqlx::query_as::<_, Division>(
            "SELECT id, name, description, created_at FROM divisions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(division)
    }

    async fn insert_division(&self, division: &Division) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO divisions (id, name, description, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(division.id)
        .bind(&division.name)
        .bind(&division.description)
        .bind(division.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_panchayaths(&self, division_id: Uuid) -> Result<Vec<Panchayath>, StoreError> {
        let panchayaths = sqlx::query_as::<_, Panchayath>(
            "SELECT id, division_id, name, created_at FROM panchayaths \
             WHERE division_id = $1 ORDER BY name",
        )
        .bind(division_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(panchayaths)
    }

    async fn insert_panchayath(&self, panchayath: &Panchayath) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO panchayaths (id, division_id, name, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(panchayath.id)
        .bind(panchayath.division_id)
        .bind(&panchayath.name)
        .bind(panchayath.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_clusters(&self, panchayath_id: Uuid) -> Result<Vec<Cluster>, StoreError> {
        let clusters = sqlx::query_as::<_, Cluster>(
            "SELECT id, panchayath_id, name, created_at FROM clusters \
             WHERE panchayath_id = $1 ORDER BY name",
        )
        .bind(panchayath_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(clusters)
    }

    async fn insert_cluster(&self, cluster: &Cluster) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO clusters (id, panchayath_id, name, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(cluster.id)
        .bind(cluster.panchayath_id)
        .bind(&cluster.name)
        .bind(cluster.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_program(&self, program: &Program) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO programs \
             (id, division_id, panchayath_id, all_panchayaths, name, description, \
              start_date, end_date, is_active, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(program.id)
        .bind(program.division_id)
        .bind(program.panchayath_id)
        .bind(program.all_panchayaths)
        .bind(&program.name)
        .bind(&program.description)
        .bind(program.start_date)
        .bind(program.end_date)
        .bind(program.is_active)
        .bind(program.created_by)
        .bind(program.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_program(&self, id: Uuid) -> Result<Option<Program>, StoreError> {
        let program = sqlx::query_as::<_, Program>(
            "SELECT id, division_id, panchayath_id, all_panchayaths, name, description, \
             start_date, end_date, is_active, created_by, created_at \
             FROM programs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(program)
    }

    async fn update_program(&self, program: &Program) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE programs SET panchayath_id = $2, all_panchayaths = $3, name = $4, \
             description = $5, start_date = $6, end_date = $7, is_active = $8 \
             WHERE id = $1",
        )
        .bind(program.id)
        .bind(program.panchayath_id)
        .bind(program.all_panchayaths)
        .bind(&program.name)
        .bind(&program.description)
        .bind(program.start_date)
        .bind(program.end_date)
        .bind(program.is_active)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_program(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_active_programs(&self) -> Result<Vec<Program>, StoreError> {
        let programs = sqlx::query_as::<_, Program>(
            "SELECT id, division_id, panchayath_id, all_panchayaths, name, description, \
             start_date, end_date, is_active, created_by, created_at \
             FROM programs WHERE is_active = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(programs)
    }

    async fn list_programs_by_division(
        &self,
        division_id: Uuid,
    ) -> Result<Vec<Program>, StoreError> {
        let programs = sqlx::query_as::<_, Program>(
            "SELECT id, division_id, panchayath_id, all_panchayaths, name, description, \
             start_date, end_date, is_active, created_by, created_at \
             FROM programs WHERE division_id = $1 ORDER BY created_at DESC",
        )
        .bind(division_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(programs)
    }

    async fn insert_member(&self, member: &Member) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO members (id, division_id, panchayath_id, name, phone, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(member.id)
        .bind(member.division_id)
        .bind(member.panchayath_id)
        .bind(&member.name)
        .bind(&member.phone)
        .bind(member.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_members_by_division(
        &self,
        division_id: Uuid,
    ) -> Result<Vec<Member>, StoreError> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT id, division_id, panchayath_id, name, phone, created_at \
             FROM members WHERE division_id = $1 ORDER BY created_at DESC",
        )
        .bind(division_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn insert_registration(&self, registration: &Registration) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO registrations (id, program_id, member_name, phone, panchayath_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(registration.id)
        .bind(registration.program_id)
        .bind(&registration.member_name)
        .bind(&registration.phone)
        .bind(registration.panchayath_id)
        .bind(registration.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_registrations_by_program(
        &self,
        program_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, program_id, member_name, phone, panchayath_id, created_at \
             FROM registrations WHERE program_id = $1 ORDER BY created_at DESC",
        )
        .bind(program_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(registrations)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
