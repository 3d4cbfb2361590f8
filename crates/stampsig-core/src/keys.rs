//! Ed25519 keypair generation.

use crate::types::KeyFile;
use ed25519_dalek::{SigningKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while creating a keypair.
#[derive(Debug, Error)]
pub enum KeygenError {
    #[error("secure random source unavailable: {0}")]
    Entropy(String),

    #[error("malformed secret key: {0}")]
    MalformedSecret(String),
}

/// An Ed25519 signing key together with its verifying key.
///
/// The secret seed is zeroized when the pair is dropped.
#[derive(Clone)]
pub struct KeyPair {
    signing: SigningKey,
}

impl KeyPair {
    /// Generate a fresh keypair from the operating system's random source.
    pub fn generate() -> Result<Self, KeygenError> {
        let mut secret = [0u8; SECRET_KEY_LENGTH];
        getrandom::fill(&mut secret).map_err(|e| KeygenError::Entropy(e.to_string()))?;

        Ok(Self::from_secret_bytes(&secret))
    }

    pub fn from_secret_bytes(secret: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing: SigningKey::from_bytes(secret),
        }
    }

    /// Restore a keypair from a hex-encoded 32-byte seed.
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self, KeygenError> {
        let bytes = hex::decode(secret_hex.trim())
            .map_err(|e| KeygenError::MalformedSecret(e.to_string()))?;
        let secret: [u8; SECRET_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            KeygenError::MalformedSecret(format!(
                "expected {SECRET_KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;

        Ok(Self::from_secret_bytes(&secret))
    }

    pub fn secret_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing.to_bytes()
    }

    pub fn public_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.signing.verifying_key().to_bytes()
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret_bytes())
    }

    pub fn public_hex(&self) -> String {
        hex::encode(self.public_bytes())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    pub fn to_key_file(&self) -> KeyFile {
        KeyFile {
            private_key: self.secret_hex(),
            public_key: self.public_hex(),
        }
    }

    /// Restore a keypair from a key file, checking that both halves agree.
    pub fn from_key_file(file: &KeyFile) -> Result<Self, KeygenError> {
        let keypair = Self::from_secret_hex(&file.private_key)?;
        if !keypair.public_hex().eq_ignore_ascii_case(file.public_key.trim()) {
            return Err(KeygenError::MalformedSecret(
                "public key does not belong to private key".to_string(),
            ));
        }
        Ok(keypair)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public_hex())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_matching_keys() {
        let pair = KeyPair::generate().unwrap();
        let derived = SigningKey::from_bytes(&pair.secret_bytes()).verifying_key();
        assert_eq!(derived.to_bytes(), pair.public_bytes());
        assert_eq!(pair.secret_hex().len(), 64);
        assert_eq!(pair.public_hex().len(), 64);
    }

    #[test]
    fn test_independent_generations_differ() {
        let first = KeyPair::generate().unwrap();
        let second = KeyPair::generate().unwrap();
        assert_ne!(first.secret_bytes(), second.secret_bytes());
        assert_ne!(first.public_bytes(), second.public_bytes());
    }

    #[test]
    fn test_from_secret_hex_restores_pair() {
        let pair = KeyPair::generate().unwrap();
        let restored = KeyPair::from_secret_hex(&pair.secret_hex()).unwrap();
        assert_eq!(restored.public_bytes(), pair.public_bytes());
    }

    #[test]
    fn test_from_secret_hex_rejects_bad_input() {
        assert!(matches!(
            KeyPair::from_secret_hex("not-hex"),
            Err(KeygenError::MalformedSecret(_))
        ));
        assert!(matches!(
            KeyPair::from_secret_hex(&"ab".repeat(31)),
            Err(KeygenError::MalformedSecret(_))
        ));
    }

    #[test]
    fn test_key_file_restores_pair() {
        let pair = KeyPair::generate().unwrap();
        let restored = KeyPair::from_key_file(&pair.to_key_file()).unwrap();
        assert_eq!(restored.secret_bytes(), pair.secret_bytes());
    }

    #[test]
    fn test_key_file_with_foreign_public_key_is_rejected() {
        let pair = KeyPair::generate().unwrap();
        let other = KeyPair::generate().unwrap();
        let mut file = pair.to_key_file();
        file.public_key = other.public_hex();

        assert!(matches!(
            KeyPair::from_key_file(&file),
            Err(KeygenError::MalformedSecret(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let pair = KeyPair::generate().unwrap();
        let rendered = format!("{pair:?}");
        assert!(rendered.contains(&pair.public_hex()));
        assert!(!rendered.contains(&pair.secret_hex()));
    }
}
