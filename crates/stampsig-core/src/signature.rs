//! Ed25519 signing of arbitrary messages and timestamps.

use crate::keys::KeyPair;
use crate::timestamp::Timestamp;
use crate::types::SignedTimestamp;
use ed25519_dalek::{Signer, SIGNATURE_LENGTH};

/// Sign a message with the pair's private key.
///
/// Ed25519 signatures are deterministic: the same key and message always
/// produce the same bytes.
pub fn sign(keypair: &KeyPair, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
    keypair.signing_key().sign(message).to_bytes()
}

/// Sign the 8-byte encoding of a timestamp and package the result.
pub fn sign_timestamp(keypair: &KeyPair, timestamp: Timestamp) -> SignedTimestamp {
    let signature = sign(keypair, &timestamp.to_le_bytes());

    SignedTimestamp {
        timestamp,
        public_key: keypair.public_hex(),
        signature: signature_hex(&signature),
    }
}

pub fn signature_hex(signature: &[u8; SIGNATURE_LENGTH]) -> String {
    hex::encode(signature)
}
