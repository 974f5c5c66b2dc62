//! Client-side session facade.
//!
//! Unifies the two sign-in paths behind one surface: an identity-provider
//! session (super admins, members) and a portal admin-token session
//! (division admins). Admin-token sessions survive reloads through the
//! injected [`SessionStore`] and are restored, expiry-checked, on
//! construction.

pub mod guard;
pub mod store;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::{AdminDescriptor, AppRole, RoleSet},
    services::AdminTokenClaims,
};

pub use guard::{GuardDecision, RouteGuard};
pub use store::{MemorySessionStore, SessionStore};

/// Storage key for the raw admin token.
pub const ADMIN_TOKEN_KEY: &str = "elife_admin_token";
/// Storage key for the serialized admin descriptor.
pub const ADMIN_DATA_KEY: &str = "elife_admin_data";

/// Identity-provider session state.
#[derive(Debug, Clone)]
pub struct IdentitySession {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub roles: RoleSet,
}

/// Division-admin session state, backed by a portal token.
#[derive(Debug, Clone)]
pub struct AdminTokenSession {
    pub token: String,
    pub admin: AdminDescriptor,
}

#[derive(Debug, Clone)]
pub enum SessionKind {
    Identity(IdentitySession),
    AdminToken(AdminTokenSession),
}

/// The current session, if any, plus persistence for admin tokens.
pub struct SessionContext {
    store: Box<dyn SessionStore>,
    current: Option<SessionKind>,
}

impl SessionContext {
    /// Build a context and restore any persisted admin-token session.
    ///
    /// An expired or unparseable persisted token is purged rather than
    /// restored; validation proper still happens server-side on the
    /// first authenticated request.
    pub fn restore(store: Box<dyn SessionStore>) -> Self {
        let current = Self::restore_admin_session(store.as_ref());
        Self { store, current }
    }

    fn restore_admin_session(store: &dyn SessionStore) -> Option<SessionKind> {
        let token = store.get(ADMIN_TOKEN_KEY)?;

        let claims = match AdminTokenClaims::peek(&token) {
            Some(claims) => claims,
            None => {
                debug!("discarding unparseable persisted admin token");
                store.remove(ADMIN_TOKEN_KEY);
                store.remove(ADMIN_DATA_KEY);
                return None;
            }
        };

        if claims.is_expired(Utc::now().timestamp_millis()) {
            debug!("discarding expired persisted admin token");
            store.remove(ADMIN_TOKEN_KEY);
            store.remove(ADMIN_DATA_KEY);
            return None;
        }

        let admin = store
            .get(ADMIN_DATA_KEY)
            .and_then(|raw| serde_json::from_str::<AdminDescriptor>(&raw).ok())
            .unwrap_or(AdminDescriptor {
                id: claims.admin_id,
                user_id: claims.user_id,
                division_id: claims.division_id,
            });

        Some(SessionKind::AdminToken(AdminTokenSession { token, admin }))
    }

    pub fn sign_in_identity(&mut self, session: IdentitySession) {
        self.current = Some(SessionKind::Identity(session));
    }

    /// Persist and activate an admin-token session.
    pub fn sign_in_admin(&mut self, token: String, admin: AdminDescriptor) {
        self.store.set(ADMIN_TOKEN_KEY, &token);
        if let Ok(raw) = serde_json::to_string(&admin) {
            self.store.set(ADMIN_DATA_KEY, &raw);
        }
        self.current = Some(SessionKind::AdminToken(AdminTokenSession { token, admin }));
    }

    pub fn sign_out(&mut self) {
        self.store.remove(ADMIN_TOKEN_KEY);
        self.store.remove(ADMIN_DATA_KEY);
        self.current = None;
    }

    pub fn current(&self) -> Option<&SessionKind> {
        self.current.as_ref()
    }

    /// The admin token to attach to requests, when signed in as one.
    pub fn admin_token(&self) -> Option<&str> {
        match &self.current {
            Some(SessionKind::AdminToken(s)) => Some(&s.token),
            _ => None,
        }
    }

    /// Effective roles of the current session.
    ///
    /// An admin-token session is an admin by construction; identity
    /// sessions carry whatever roles were loaded at sign-in.
    pub fn role_set(&self) -> RoleSet {
        match &self.current {
            None => RoleSet::default(),
            Some(SessionKind::AdminToken(_)) => [AppRole::Admin].into_iter().collect(),
            Some(SessionKind::Identity(s)) => s.roles.clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_super_admin(&self) -> bool {
        self.role_set().is_super_admin()
    }

    pub fn is_admin(&self) -> bool {
        self.role_set().is_admin()
    }

    pub fn is_member(&self) -> bool {
        self.role_set().is_member()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Admin;
    use crate::services::AdminTokenService;
    use crate::utils::{hash_password, Password};

    fn descriptor() -> AdminDescriptor {
        let hash = hash_password(&Password::new("secret123".to_string()));
        Admin::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "9876543210".to_string(),
            hash.into_string(),
        )
        .descriptor()
    }

    fn token_expiring_in(ms: i64, admin: &AdminDescriptor) -> String {
        AdminTokenService::new("session-test-secret")
            .encode(&AdminTokenClaims {
                admin_id: admin.id,
                user_id: admin.user_id,
                division_id: admin.division_id,
                exp: Utc::now().timestamp_millis() + ms,
            })
            .unwrap()
    }

    #[test]
    fn test_restore_without_persisted_token() {
        let session = SessionContext::restore(Box::new(MemorySessionStore::new()));
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_sign_in_admin_persists_and_restores() {
        let store = MemorySessionStore::new();
        let admin = descriptor();
        let token = token_expiring_in(60_000, &admin);

        let mut session = SessionContext::restore(Box::new(store));
        session.sign_in_admin(token.clone(), admin.clone());
        assert!(session.is_admin());
        assert!(!session.is_super_admin());
        assert!(session.is_member());
        assert_eq!(session.admin_token(), Some(token.as_str()));

        // A fresh context over the same storage picks the session back up.
        let raw_token = token.clone();
        let store = MemorySessionStore::new();
        store.set(ADMIN_TOKEN_KEY, &raw_token);
        store.set(ADMIN_DATA_KEY, &serde_json::to_string(&admin).unwrap());
        let restored = SessionContext::restore(Box::new(store));
        assert!(restored.is_authenticated());
        match restored.current() {
            Some(SessionKind::AdminToken(s)) => assert_eq!(s.admin, admin),
            other => panic!("expected admin session, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn test_restore_purges_expired_token() {
        let admin = descriptor();
        let store = MemorySessionStore::new();
        store.set(ADMIN_TOKEN_KEY, &token_expiring_in(-1_000, &admin));
        store.set(ADMIN_DATA_KEY, &serde_json::to_string(&admin).unwrap());

        let session = SessionContext::restore(Box::new(store));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_restore_purges_garbage_token() {
        let store = MemorySessionStore::new();
        store.set(ADMIN_TOKEN_KEY, "garbage");

        let session = SessionContext::restore(Box::new(store));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_sign_out_clears_storage() {
        let admin = descriptor();
        let token = token_expiring_in(60_000, &admin);
        let mut session = SessionContext::restore(Box::new(MemorySessionStore::new()));
        session.sign_in_admin(token, admin);
        session.sign_out();
        assert!(!session.is_authenticated());
        assert!(session.admin_token().is_none());
    }

    #[test]
    fn test_identity_session_roles() {
        let mut session = SessionContext::restore(Box::new(MemorySessionStore::new()));
        session.sign_in_identity(IdentitySession {
            user_id: Uuid::new_v4(),
            email: Some("chair@example.org".to_string()),
            roles: [AppRole::SuperAdmin].into_iter().collect(),
        });
        assert!(session.is_super_admin());
        assert!(session.is_admin());
        assert!(session.is_member());
    }
}
