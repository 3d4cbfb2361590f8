//! Signed timestamp records.

use crate::timestamp::{Timestamp, ENCODED_LEN};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or writing a signed record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A timestamp signed by the holder of `public_key`.
///
/// The signed message is the 8-byte little-endian encoding of `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignedTimestamp {
    /// Whole seconds since the Unix epoch
    pub timestamp: Timestamp,

    /// Hex-encoded Ed25519 verifying key of the signer
    pub public_key: String,

    /// Hex-encoded 64-byte Ed25519 signature
    pub signature: String,
}

impl SignedTimestamp {
    /// The exact bytes covered by the signature.
    pub fn message(&self) -> [u8; ENCODED_LEN] {
        self.timestamp.to_le_bytes()
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a signed record from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Save the record to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RecordError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

/// A keypair exported as hex, as written by `keygen` and read by `sign`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyFile {
    pub private_key: String,
    pub public_key: String,
}

impl KeyFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RecordError> {
        fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
