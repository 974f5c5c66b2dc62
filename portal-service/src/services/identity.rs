//! Identity-provider token verification for the Bearer auth path.
//!
//! Super admins and regular members authenticate against the hosted
//! identity provider and present its JWT as `Authorization: Bearer`.
//! Division admins use the portal's own signed token instead; see
//! [`crate::services::token`].

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::ServiceError;

/// Claims we consume from an identity-provider JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject, the provider-side user id.
    pub sub: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, epoch seconds.
    pub exp: i64,
}

/// A verified identity-provider user.
#[derive(Debug, Clone)]
pub struct IdentityUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

/// Verifies identity-provider access tokens.
///
/// Trait seam so tests can mint their own tokens against a known secret
/// without talking to the hosted provider.
pub trait IdentityProvider: Send + Sync {
    fn verify(&self, token: &str) -> Result<IdentityUser, ServiceError>;
}

/// HS256 verification against the provider's shared JWT secret.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Provider tokens carry an audience we do not pin on.
        validation.validate_aud = false;
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn verify(&self, token: &str) -> Result<IdentityUser, ServiceError> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::InvalidToken,
            })?;

        Ok(IdentityUser {
            user_id: data.claims.sub,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-jwt-secret";

    fn mint(claims: &IdentityClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let user_id = Uuid::new_v4();
        let token = mint(
            &IdentityClaims {
                sub: user_id,
                email: Some("chair@example.org".to_string()),
                exp: Utc::now().timestamp() + 3600,
            },
            SECRET,
        );

        let user = JwtIdentityProvider::new(SECRET).verify(&token).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.email.as_deref(), Some("chair@example.org"));
    }

    #[test]
    fn test_expired_token() {
        let token = mint(
            &IdentityClaims {
                sub: Uuid::new_v4(),
                email: None,
                exp: Utc::now().timestamp() - 3600,
            },
            SECRET,
        );

        let result = JwtIdentityProvider::new(SECRET).verify(&token);
        assert!(matches!(result, Err(ServiceError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret() {
        let token = mint(
            &IdentityClaims {
                sub: Uuid::new_v4(),
                email: None,
                exp: Utc::now().timestamp() + 3600,
            },
            "another-secret",
        );

        let result = JwtIdentityProvider::new(SECRET).verify(&token);
        assert!(matches!(result, Err(ServiceError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token() {
        let result = JwtIdentityProvider::new(SECRET).verify("not.a.jwt");
        assert!(matches!(result, Err(ServiceError::InvalidToken)));
    }
}
