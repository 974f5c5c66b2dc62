//! Role-gated route guard for the portal client.

use crate::{
    models::{AppRole, RoleSet},
    session::SessionContext,
};

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Not signed in; send to sign-in and come back afterwards.
    RedirectToSignIn { return_to: String },
    /// Signed in but lacking the required role.
    RedirectToUnauthorized,
}

/// Declarative guard for a route. `None` required roles means any
/// authenticated session passes.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    pub required_roles: Option<Vec<AppRole>>,
}

impl RouteGuard {
    pub fn authenticated() -> Self {
        Self {
            required_roles: None,
        }
    }

    pub fn require(roles: &[AppRole]) -> Self {
        Self {
            required_roles: Some(roles.to_vec()),
        }
    }

    pub fn check(&self, session: &SessionContext, path: &str) -> GuardDecision {
        if !session.is_authenticated() {
            return GuardDecision::RedirectToSignIn {
                return_to: path.to_string(),
            };
        }

        match &self.required_roles {
            None => GuardDecision::Allow,
            Some(required) => {
                let roles = session.role_set();
                if required.iter().any(|r| satisfies(&roles, *r)) {
                    GuardDecision::Allow
                } else {
                    GuardDecision::RedirectToUnauthorized
                }
            }
        }
    }
}

/// Role satisfaction follows the privilege ladder, so a super admin
/// passes an `admin` requirement and an admin passes `member`.
fn satisfies(roles: &RoleSet, required: AppRole) -> bool {
    match required {
        AppRole::SuperAdmin => roles.is_super_admin(),
        AppRole::Admin => roles.is_admin(),
        AppRole::Member => roles.is_member(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{IdentitySession, MemorySessionStore};
    use uuid::Uuid;

    fn session_with(roles: &[AppRole]) -> SessionContext {
        let mut session = SessionContext::restore(Box::new(MemorySessionStore::new()));
        session.sign_in_identity(IdentitySession {
            user_id: Uuid::new_v4(),
            email: None,
            roles: roles.iter().copied().collect(),
        });
        session
    }

    #[test]
    fn test_anonymous_redirects_to_sign_in_with_return_path() {
        let session = SessionContext::restore(Box::new(MemorySessionStore::new()));
        let guard = RouteGuard::require(&[AppRole::Admin]);
        assert_eq!(
            guard.check(&session, "/admin/programs/42"),
            GuardDecision::RedirectToSignIn {
                return_to: "/admin/programs/42".to_string()
            }
        );
    }

    #[test]
    fn test_authenticated_without_role_is_unauthorized() {
        let session = session_with(&[AppRole::Member]);
        let guard = RouteGuard::require(&[AppRole::Admin]);
        assert_eq!(
            guard.check(&session, "/admin"),
            GuardDecision::RedirectToUnauthorized
        );
    }

    #[test]
    fn test_super_admin_passes_admin_requirement() {
        let session = session_with(&[AppRole::SuperAdmin]);
        let guard = RouteGuard::require(&[AppRole::Admin]);
        assert_eq!(guard.check(&session, "/admin"), GuardDecision::Allow);
    }

    #[test]
    fn test_no_required_roles_needs_only_a_session() {
        let session = session_with(&[AppRole::Member]);
        let guard = RouteGuard::authenticated();
        assert_eq!(guard.check(&session, "/profile"), GuardDecision::Allow);
    }
}
