//! Signed timestamps: whole-second time capture, Ed25519 signing and verification.
//!
//! A timestamp is encoded as 8 little-endian bytes, signed with a freshly
//! generated Ed25519 key and checked again with the matching public key.
//!
//! # Example
//!
//! ```
//! use stampsig_core::{sign_timestamp, KeyPair, Timestamp};
//!
//! let ts = Timestamp::from_secs(1_700_000_000);
//! assert_eq!(ts.to_le_bytes(), [0x00, 0xF1, 0x53, 0x65, 0x00, 0x00, 0x00, 0x00]);
//!
//! let keypair = KeyPair::generate().unwrap();
//! let record = sign_timestamp(&keypair, ts);
//! assert!(record.verify().is_ok());
//! ```

mod keys;
mod signature;
mod timestamp;
mod types;
mod verify;

pub use keys::{KeyPair, KeygenError};
pub use signature::{sign, sign_timestamp, signature_hex};
pub use timestamp::{format_bytes, Timestamp, TimestampError, ENCODED_LEN};
pub use types::{KeyFile, RecordError, SignedTimestamp};
pub use verify::{verify, verify_hex, VerifyError};
