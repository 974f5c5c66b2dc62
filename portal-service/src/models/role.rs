//! Role assignments for identity-provider users.
//!
//! A user may hold multiple role rows; effective privilege is the union,
//! with `super_admin` dominating.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// Closed set of portal roles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    SuperAdmin,
    Admin,
    Member,
}

impl AppRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::SuperAdmin => "super_admin",
            AppRole::Admin => "admin",
            AppRole::Member => "member",
        }
    }
}

impl std::str::FromStr for AppRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(AppRole::SuperAdmin),
            "admin" => Ok(AppRole::Admin),
            "member" => Ok(AppRole::Member),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Union of role-assignment rows for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<AppRole>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: AppRole) {
        self.0.insert(role);
    }

    pub fn contains(&self, role: AppRole) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_super_admin(&self) -> bool {
        self.contains(AppRole::SuperAdmin)
    }

    /// `admin` role, or anything stronger.
    pub fn is_admin(&self) -> bool {
        self.contains(AppRole::Admin) || self.is_super_admin()
    }

    /// `member` role, or anything stronger.
    pub fn is_member(&self) -> bool {
        self.contains(AppRole::Member) || self.is_admin()
    }

    /// True if any of `roles` is held directly.
    pub fn intersects(&self, roles: &[AppRole]) -> bool {
        roles.iter().any(|r| self.contains(*r))
    }

    pub fn iter(&self) -> impl Iterator<Item = AppRole> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<AppRole> for RoleSet {
    fn from_iter<T: IntoIterator<Item = AppRole>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
