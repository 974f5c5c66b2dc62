use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Newtype for password to prevent accidental logging
#[derive(Debug, Clone)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Self {
        Self(password)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Newtype for password hash
#[derive(Debug, Clone)]
pub struct PasswordHashString(String);

impl PasswordHashString {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Hash a password with SHA-256, hex-encoded.
///
/// This matches the credential format already provisioned for division
/// admins; it is a plain digest, not a salted KDF.
pub fn hash_password(password: &Password) -> PasswordHashString {
    let digest = Sha256::digest(password.as_str().as_bytes());
    PasswordHashString::new(hex::encode(digest))
}

/// Verify a password against a stored digest using constant-time comparison.
///
/// Returns Ok(()) if the password matches, Err otherwise.
pub fn verify_password(
    password: &Password,
    password_hash: &PasswordHashString,
) -> Result<(), anyhow::Error> {
    let computed = hash_password(password);
    let computed = computed.as_str().as_bytes();
    let stored = password_hash.as_str().as_bytes();

    if computed.len() != stored.len() || computed.ct_eq(stored).unwrap_u8() != 1 {
        return Err(anyhow::anyhow!("Password verification failed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_hex_sha256() {
        let password = Password::new("secret1".to_string());
        let hash = hash_password(&password);

        assert_eq!(hash.as_str().len(), 64);
        assert!(hash.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        // Known digest of "secret1"
        assert_eq!(
            hash.as_str(),
            "5b11618c2e44027877d0cd0921ed166b9f176f50587fc91e7534dd2946db77d6"
        );
    }

    #[test]
    fn test_verify_password_correct() {
        let password = Password::new("mySecurePassword123".to_string());
        let hash = hash_password(&password);

        assert!(verify_password(&password, &hash).is_ok());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let password = Password::new("mySecurePassword123".to_string());
        let hash = hash_password(&password);

        let wrong_password = Password::new("wrongPassword".to_string());
        assert!(verify_password(&wrong_password, &hash).is_err());
    }

    #[test]
    fn test_verify_against_malformed_stored_hash() {
        let password = Password::new("anything".to_string());
        let hash = PasswordHashString::new("not-a-digest".to_string());
        assert!(verify_password(&password, &hash).is_err());
    }
}
