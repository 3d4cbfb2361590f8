//! Ed25519 signature verification with a typed verdict.

use crate::types::SignedTimestamp;
use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use thiserror::Error;

/// Reasons a signature is not accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("malformed public key: {0}")]
    MalformedPublicKey(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature does not match message and public key")]
    Rejected,

    #[error("record signed by {found}, expected {expected}")]
    KeyMismatch { expected: String, found: String },
}

impl VerifyError {
    /// True when the inputs could not be parsed, as opposed to a signature
    /// that was checked and failed.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            VerifyError::MalformedPublicKey(_) | VerifyError::MalformedSignature(_)
        )
    }
}

fn parse_public_key(bytes: &[u8]) -> Result<VerifyingKey, VerifyError> {
    let array: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
        VerifyError::MalformedPublicKey(format!(
            "expected {PUBLIC_KEY_LENGTH} bytes, got {}",
            bytes.len()
        ))
    })?;

    let key = VerifyingKey::from_bytes(&array)
        .map_err(|_| VerifyError::MalformedPublicKey("not a valid curve point".to_string()))?;
    if key.is_weak() {
        return Err(VerifyError::MalformedPublicKey(
            "weak key of small order".to_string(),
        ));
    }
    Ok(key)
}

fn parse_signature(bytes: &[u8]) -> Result<Signature, VerifyError> {
    let array: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| {
        VerifyError::MalformedSignature(format!(
            "expected {SIGNATURE_LENGTH} bytes, got {}",
            bytes.len()
        ))
    })?;
    Ok(Signature::from_bytes(&array))
}

fn decode_hex(input: &str, wrap: fn(String) -> VerifyError) -> Result<Vec<u8>, VerifyError> {
    hex::decode(input.trim()).map_err(|e| wrap(e.to_string()))
}

/// Verify `signature` over `message` against `public_key`.
///
/// Uses strict Ed25519 verification, which also rejects non-canonical
/// signatures.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<(), VerifyError> {
    let key = parse_public_key(public_key)?;
    let signature = parse_signature(signature)?;

    key.verify_strict(message, &signature)
        .map_err(|_| VerifyError::Rejected)
}

/// Verify hex-encoded key and signature over raw message bytes.
pub fn verify_hex(
    public_key_hex: &str,
    message: &[u8],
    signature_hex: &str,
) -> Result<(), VerifyError> {
    let public_key = decode_hex(public_key_hex, VerifyError::MalformedPublicKey)?;
    let signature = decode_hex(signature_hex, VerifyError::MalformedSignature)?;
    verify(&public_key, message, &signature)
}

impl SignedTimestamp {
    /// Check the signature against the public key embedded in the record.
    pub fn verify(&self) -> Result<(), VerifyError> {
        verify_hex(&self.public_key, &self.message(), &self.signature)
    }

    /// Check the signature and require that it was made by `expected_hex`.
    pub fn verify_with(&self, expected_hex: &str) -> Result<(), VerifyError> {
        let expected = decode_hex(expected_hex, VerifyError::MalformedPublicKey)?;
        let found = decode_hex(&self.public_key, VerifyError::MalformedPublicKey)?;
        if expected != found {
            return Err(VerifyError::KeyMismatch {
                expected: hex::encode(expected),
                found: hex::encode(found),
            });
        }
        self.verify()
    }
}
