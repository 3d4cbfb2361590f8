//! The default pipeline: capture, encode, sign and verify one timestamp.
//!
//! Steps run once, in order:
//! 1. Read the clock and round to the nearest second
//! 2. Encode as 8 little-endian bytes and decode back
//! 3. Generate a fresh Ed25519 keypair
//! 4. Sign the encoded bytes
//! 5. Verify the signature and report `ok` or `ng`

use anyhow::{Context, Result};
use stampsig_core::{
    format_bytes, sign, signature_hex, verify_hex, KeyPair, Timestamp, VerifyError,
    ENCODED_LEN,
};
use tracing::{debug, info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the demo prints, in print order.
#[derive(Debug)]
pub struct DemoReport {
    pub timestamp: Timestamp,
    pub encoded: [u8; ENCODED_LEN],
    pub decoded: Timestamp,
    pub date: String,
    pub private_key: String,
    pub public_key: String,
    pub signature: String,
    pub verdict: Result<(), VerifyError>,
}

impl DemoReport {
    /// One output line per field; the last is `ok` or `ng`.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.timestamp.to_string(),
            format_bytes(&self.encoded),
            self.decoded.to_string(),
            self.date.clone(),
            self.private_key.clone(),
            self.public_key.clone(),
            format!("signature {}", self.signature),
            self.verdict_text().to_string(),
        ]
    }

    pub fn verdict_text(&self) -> &'static str {
        if self.verdict.is_ok() {
            "ok"
        } else {
            "ng"
        }
    }
}

/// Run the pipeline for a given timestamp and keypair.
///
/// Only verification failures are folded into the report; encoding or date
/// errors propagate.
pub fn build_report(timestamp: Timestamp, keypair: &KeyPair, utc: bool) -> Result<DemoReport> {
    let encoded = timestamp.to_le_bytes();
    let decoded = timestamp
        .round_trip()
        .context("timestamp encoding round trip failed")?;
    debug!(%timestamp, encoded = %format_bytes(&encoded), "encoded timestamp");

    let date = if utc {
        decoded.to_utc()?.format(DATE_FORMAT).to_string()
    } else {
        decoded.to_local()?.format(DATE_FORMAT).to_string()
    };

    let signature = signature_hex(&sign(keypair, &encoded));
    let public_key = keypair.public_hex();

    let verdict = verify_hex(&public_key, &encoded, &signature);
    match &verdict {
        Ok(()) => info!(%timestamp, "signature verified"),
        Err(err) => warn!(
            %timestamp,
            error = %err,
            malformed = err.is_malformed(),
            "signature verification failed"
        ),
    }

    Ok(DemoReport {
        timestamp,
        encoded,
        decoded,
        date,
        private_key: keypair.secret_hex(),
        public_key,
        signature,
        verdict,
    })
}

/// Handle the `demo` command.
pub fn cmd_demo(utc: bool) -> Result<()> {
    let timestamp = Timestamp::now().context("failed to read the system clock")?;
    let keypair = KeyPair::generate().context("failed to generate keypair")?;

    let report = build_report(timestamp, &keypair, utc)?;
    for line in report.lines() {
        println!("{line}");
    }

    Ok(())
}
