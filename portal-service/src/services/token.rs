//! Admin session token codec.
//!
//! Tokens are self-contained bearer credentials: a base64-encoded JSON
//! payload and a hex-encoded HMAC-SHA256 signature over the payload text,
//! joined by a dot. Nothing is persisted server-side; revocation happens
//! through admin deactivation (re-checked per request) or expiry.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::services::ServiceError;

type HmacSha256 = Hmac<Sha256>;

/// Fixed 24-hour validity window from issuance.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Payload carried inside an admin session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminTokenClaims {
    pub admin_id: Uuid,
    pub user_id: Uuid,
    pub division_id: Uuid,
    /// Absolute expiry, epoch milliseconds.
    pub exp: i64,
}

impl AdminTokenClaims {
    /// Parse the payload segment without verifying the signature.
    ///
    /// Used by the client-side session facade, which holds no secret and
    /// only needs the expiry for restore decisions. Server-side validation
    /// must go through [`AdminTokenService::decode`].
    pub fn peek(token: &str) -> Option<Self> {
        let (payload_b64, _) = token.split_once('.')?;
        let payload = BASE64.decode(payload_b64).ok()?;
        serde_json::from_slice(&payload).ok()
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.exp <= now_ms
    }
}

/// Signs and verifies admin session tokens with a server-held secret.
#[derive(Clone)]
pub struct AdminTokenService {
    secret: Vec<u8>,
}

impl AdminTokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    /// Issue a token for an admin with the fixed 24-hour expiry.
    pub fn issue(
        &self,
        admin_id: Uuid,
        user_id: Uuid,
        division_id: Uuid,
    ) -> Result<String, ServiceError> {
        let claims = AdminTokenClaims {
            admin_id,
            user_id,
            division_id,
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp_millis(),
        };
        self.encode(&claims)
    }

    /// Encode claims into the `base64(payload).hexsignature` wire format.
    pub fn encode(&self, claims: &AdminTokenClaims) -> Result<String, ServiceError> {
        let payload = serde_json::to_string(claims)
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Token encoding error: {}", e)))?;
        let signature = self.sign(payload.as_bytes())?;
        Ok(format!("{}.{}", BASE64.encode(&payload), hex::encode(signature)))
    }

    /// Decode and verify a token.
    ///
    /// Signature and structure failures yield `InvalidToken`; an elapsed
    /// expiry on an otherwise valid token yields `TokenExpired`. Never
    /// panics on malformed input.
    pub fn decode(&self, token: &str) -> Result<AdminTokenClaims, ServiceError> {
        let (payload_b64, signature_hex) = token.split_once('.').ok_or(ServiceError::InvalidToken)?;

        let payload = BASE64
            .decode(payload_b64)
            .map_err(|_| ServiceError::InvalidToken)?;
        let signature = hex::decode(signature_hex).map_err(|_| ServiceError::InvalidToken)?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| ServiceError::InvalidToken)?;

        let claims: AdminTokenClaims =
            serde_json::from_slice(&payload).map_err(|_| ServiceError::InvalidToken)?;

        if claims.is_expired(Utc::now().timestamp_millis()) {
            return Err(ServiceError::TokenExpired);
        }

        Ok(claims)
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, ServiceError> {
        let mut mac = self.mac()?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn mac(&self) -> Result<HmacSha256, ServiceError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("HMAC init error: {}", e)))
    }
}
