//! Whole-second timestamps and their fixed-width little-endian encoding.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Width of the wire encoding in bytes.
pub const ENCODED_LEN: usize = 8;

/// Sub-second part at or above which a timestamp rounds up.
const HALF_SECOND_NANOS: u32 = 500_000_000;

/// Errors that can occur while capturing, decoding or rendering a timestamp.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("time {0}s lies before the Unix epoch")]
    BeforeEpoch(i64),

    #[error("encoded timestamp must be 8 bytes, got {0}")]
    InvalidLength(usize),

    #[error("decoded timestamp {decoded} does not match encoded value {original}")]
    RoundTripMismatch { original: u64, decoded: u64 },

    #[error("timestamp {0}s cannot be rendered as a calendar date")]
    OutOfRange(u64),
}

/// Seconds since the Unix epoch, rounded to the nearest whole second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Read the system clock and round to the nearest second.
    pub fn now() -> Result<Self, TimestampError> {
        Self::from_datetime(Utc::now())
    }

    /// Round an instant to the nearest second; exactly half a second rounds up.
    pub fn from_datetime(time: DateTime<Utc>) -> Result<Self, TimestampError> {
        let mut secs = time.timestamp();
        // Leap seconds report nanos >= 1e9, which still rounds up.
        if time.timestamp_subsec_nanos() >= HALF_SECOND_NANOS {
            secs += 1;
        }

        u64::try_from(secs)
            .map(Self)
            .map_err(|_| TimestampError::BeforeEpoch(secs))
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> u64 {
        self.0
    }

    pub fn to_le_bytes(self) -> [u8; ENCODED_LEN] {
        self.0.to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; ENCODED_LEN]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Decode a byte slice that must hold exactly one encoded timestamp.
    pub fn decode(bytes: &[u8]) -> Result<Self, TimestampError> {
        let array: [u8; ENCODED_LEN] = bytes
            .try_into()
            .map_err(|_| TimestampError::InvalidLength(bytes.len()))?;
        Ok(Self::from_le_bytes(array))
    }

    /// Encode, decode again and confirm the value survived unchanged.
    pub fn round_trip(self) -> Result<Self, TimestampError> {
        let decoded = Self::decode(&self.to_le_bytes())?;
        if decoded != self {
            return Err(TimestampError::RoundTripMismatch {
                original: self.0,
                decoded: decoded.0,
            });
        }
        Ok(decoded)
    }

    pub fn to_utc(self) -> Result<DateTime<Utc>, TimestampError> {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or(TimestampError::OutOfRange(self.0))
    }

    /// The same instant in the process's local timezone.
    pub fn to_local(self) -> Result<DateTime<Local>, TimestampError> {
        Ok(self.to_utc()?.with_timezone(&Local))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render bytes as a bracketed list of hex literals, e.g. `[0x00, 0xf1]`.
pub fn format_bytes(bytes: &[u8]) -> String {
    let parts: Vec<String> = bytes.iter().map(|b| format!("0x{b:02x}")).collect();
    format!("[{}]", parts.join(", "))
}
