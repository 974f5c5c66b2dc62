//! Division-scope authorization.
//!
//! One rule governs every admin write: super admins act anywhere, a
//! division admin acts only inside their own division. Handlers pass the
//! denial message appropriate to the operation so responses stay
//! operation-specific.

use uuid::Uuid;

use crate::{middleware::AuthContext, services::ServiceError};

/// Check that `ctx` may act on a resource belonging to `division_id`.
pub fn authorize_division(
    ctx: &AuthContext,
    division_id: Uuid,
    denial: &str,
) -> Result<(), ServiceError> {
    if ctx.is_super_admin() {
        return Ok(());
    }
    match ctx.division_id() {
        Some(own) if own == division_id => Ok(()),
        _ => Err(ServiceError::Forbidden(denial.to_string())),
    }
}

/// Resolve the division a caller-supplied payload targets.
///
/// An explicit `division_id` in the payload wins (and is then subject to
/// [`authorize_division`]); absent one, a division admin defaults to
/// their own division. Super admins must name one explicitly.
pub fn effective_division(
    ctx: &AuthContext,
    requested: Option<Uuid>,
) -> Result<Uuid, ServiceError> {
    requested
        .or_else(|| ctx.division_id())
        .ok_or_else(|| ServiceError::Validation("division_id is required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{AdminContext, IdentityContext};
    use crate::models::{AppRole, RoleSet};

    fn division_admin(division_id: Uuid) -> AuthContext {
        AuthContext::DivisionAdmin(AdminContext {
            admin_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            division_id,
        })
    }

    fn identity_with(roles: &[AppRole]) -> AuthContext {
        AuthContext::Identity(IdentityContext {
            user_id: Uuid::new_v4(),
            email: None,
            roles: roles.iter().copied().collect::<RoleSet>(),
        })
    }

    #[test]
    fn test_admin_allowed_in_own_division() {
        let division = Uuid::new_v4();
        let ctx = division_admin(division);
        assert!(authorize_division(&ctx, division, "denied").is_ok());
    }

    #[test]
    fn test_admin_denied_in_other_division() {
        let ctx = division_admin(Uuid::new_v4());
        let result = authorize_division(&ctx, Uuid::new_v4(), "You can only create programs for your division");
        match result {
            Err(ServiceError::Forbidden(msg)) => {
                assert_eq!(msg, "You can only create programs for your division");
            }
            other => panic!("expected Forbidden, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_super_admin_bypasses_division_check() {
        let ctx = identity_with(&[AppRole::SuperAdmin]);
        assert!(authorize_division(&ctx, Uuid::new_v4(), "denied").is_ok());
    }

    #[test]
    fn test_plain_identity_user_is_denied() {
        let ctx = identity_with(&[AppRole::Member]);
        assert!(authorize_division(&ctx, Uuid::new_v4(), "denied").is_err());
    }

    #[test]
    fn test_effective_division_defaults_to_own_division() {
        let division = Uuid::new_v4();
        let ctx = division_admin(division);
        assert_eq!(effective_division(&ctx, None).unwrap(), division);
        // An explicit target is kept so the authorization check can see it.
        let other = Uuid::new_v4();
        assert_eq!(effective_division(&ctx, Some(other)).unwrap(), other);
    }

    #[test]
    fn test_effective_division_requires_explicit_target_for_super_admin() {
        let ctx = identity_with(&[AppRole::SuperAdmin]);
        let target = Uuid::new_v4();
        assert_eq!(effective_division(&ctx, Some(target)).unwrap(), target);
        assert!(effective_division(&ctx, None).is_err());
    }
}
