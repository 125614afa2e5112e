//! Deterministic credential hashing.
//!
//! Operator passwords are stored as `hex(SHA-256(password || secret))`.
//! The digest is deterministic so the database can enforce uniqueness of the
//! full `(space, login, password_hash)` triple and look a credential up by
//! it directly.

use std::fmt;

use sha2::{Digest, Sha256};

/// Trim and lowercase a space or login before it is written or compared.
pub fn normalize_credential_field(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Salted password hasher. The secret comes from configuration and is never
/// persisted or logged.
#[derive(Clone)]
pub struct CredentialHasher {
    secret: String,
}

impl CredentialHasher {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Hash a plaintext password with the configured secret appended.
    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(self.secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_and_secret_give_empty_digest() {
        assert_eq!(
            CredentialHasher::new("").hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_is_password_then_secret() {
        let hasher = CredentialHasher::new("pepper");
        assert_eq!(
            hasher.hash("salt"),
            format!("{:x}", Sha256::digest(b"saltpepper"))
        );
    }

    #[test]
    fn hash_is_deterministic() {
        let hasher = CredentialHasher::new("secret");
        assert_eq!(hasher.hash("pw"), hasher.hash("pw"));
        assert_eq!(hasher.hash("pw").len(), 64);
    }

    #[test]
    fn different_secrets_give_different_hashes() {
        let a = CredentialHasher::new("one");
        let b = CredentialHasher::new("two");
        assert_ne!(a.hash("pw"), b.hash("pw"));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let hasher = CredentialHasher::new("top-secret");
        let rendered = format!("{hasher:?}");
        assert!(!rendered.contains("top-secret"));
    }

    #[test]
    fn fields_normalized() {
        assert_eq!(normalize_credential_field("  Bob "), "bob");
    }
}
