//! Signed record CLI commands.

use anyhow::{Context, Result};
use colored::Colorize;
use stampsig_core::{sign_timestamp, KeyFile, KeyPair, SignedTimestamp, Timestamp};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Handle the `sign` command.
pub fn cmd_sign(
    key: Option<String>,
    key_file: Option<PathBuf>,
    timestamp: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let keypair = match (key, key_file) {
        (Some(_), Some(_)) => anyhow::bail!("--key and --key-file are mutually exclusive"),
        (Some(secret_hex), None) => {
            KeyPair::from_secret_hex(&secret_hex).context("invalid --key")?
        }
        (None, Some(path)) => {
            let file = KeyFile::load(&path)
                .with_context(|| format!("failed to load key file from {}", path.display()))?;
            KeyPair::from_key_file(&file)
                .with_context(|| format!("invalid key file {}", path.display()))?
        }
        (None, None) => {
            debug!("no --key given, signing with a fresh keypair");
            KeyPair::generate().context("failed to generate keypair")?
        }
    };

    let timestamp = match timestamp {
        Some(secs) => Timestamp::from_secs(secs),
        None => Timestamp::now().context("failed to read the system clock")?,
    };

    let record = sign_timestamp(&keypair, timestamp);
    info!(%timestamp, public_key = %record.public_key, "signed timestamp");

    if let Some(path) = output {
        record
            .save(&path)
            .with_context(|| format!("failed to write signed record to {}", path.display()))?;
        println!(
            "{} Signed timestamp {} written to {}",
            "✓".green(),
            timestamp,
            path.display()
        );
    } else {
        println!("{}", record.to_json()?);
    }

    Ok(())
}

/// Handle the `verify` command.
///
/// Prints `ok` or `ng` and returns whether the record verified. Failures to
/// read the record are errors, not verdicts.
pub fn cmd_verify(file: PathBuf, public_key: Option<String>) -> Result<bool> {
    let record = SignedTimestamp::load(&file)
        .with_context(|| format!("failed to load signed record from {}", file.display()))?;

    let verdict = match &public_key {
        Some(expected) => record.verify_with(expected),
        None => record.verify(),
    };

    match verdict {
        Ok(()) => {
            info!(timestamp = %record.timestamp, file = %file.display(), "signature verified");
            println!("ok");
            Ok(true)
        }
        Err(err) => {
            warn!(
                timestamp = %record.timestamp,
                file = %file.display(),
                error = %err,
                malformed = err.is_malformed(),
                "signature verification failed"
            );
            println!("ng");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_record(dir: &TempDir, keypair: &KeyPair) -> PathBuf {
        let path = dir.path().join("stamp.json");
        sign_timestamp(keypair, Timestamp::from_secs(1_700_000_000))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_verify_valid_record() {
        let dir = TempDir::new().unwrap();
        let keypair = KeyPair::generate().unwrap();
        let path = write_record(&dir, &keypair);

        assert!(cmd_verify(path.clone(), None).unwrap());
        assert!(cmd_verify(path, Some(keypair.public_hex())).unwrap());
    }

    #[test]
    fn test_verify_tampered_record() {
        let dir = TempDir::new().unwrap();
        let keypair = KeyPair::generate().unwrap();
        let path = write_record(&dir, &keypair);

        let mut record = SignedTimestamp::load(&path).unwrap();
        record.timestamp = Timestamp::from_secs(1_700_000_001);
        record.save(&path).unwrap();

        assert!(!cmd_verify(path, None).unwrap());
    }

    #[test]
    fn test_verify_wrong_pinned_key() {
        let dir = TempDir::new().unwrap();
        let keypair = KeyPair::generate().unwrap();
        let other = KeyPair::generate().unwrap();
        let path = write_record(&dir, &keypair);

        assert!(!cmd_verify(path, Some(other.public_hex())).unwrap());
    }

    #[test]
    fn test_verify_missing_file_is_error() {
        assert!(cmd_verify(PathBuf::from("/nonexistent/stamp.json"), None).is_err());
    }

    #[test]
    fn test_sign_with_given_key_writes_record() {
        let dir = TempDir::new().unwrap();
        let keypair = KeyPair::generate().unwrap();
        let path = dir.path().join("out.json");

        cmd_sign(Some(keypair.secret_hex()), None, Some(42), Some(path.clone())).unwrap();

        let record = SignedTimestamp::load(&path).unwrap();
        assert_eq!(record.timestamp.as_secs(), 42);
        assert_eq!(record.public_key, keypair.public_hex());
        assert!(record.verify().is_ok());
    }

    #[test]
    fn test_sign_rejects_bad_key() {
        assert!(cmd_sign(Some("xyz".to_string()), None, Some(1), None).is_err());
    }

    #[test]
    fn test_sign_with_key_file() {
        let dir = TempDir::new().unwrap();
        let keypair = KeyPair::generate().unwrap();
        let key_path = dir.path().join("key.json");
        let out_path = dir.path().join("out.json");
        keypair.to_key_file().save(&key_path).unwrap();

        cmd_sign(None, Some(key_path), Some(7), Some(out_path.clone())).unwrap();

        let record = SignedTimestamp::load(&out_path).unwrap();
        assert_eq!(record.public_key, keypair.public_hex());
        assert!(record.verify_with(&keypair.public_hex()).is_ok());
    }

    #[test]
    fn test_sign_rejects_both_key_sources() {
        let dir = TempDir::new().unwrap();
        let keypair = KeyPair::generate().unwrap();
        let key_path = dir.path().join("key.json");
        keypair.to_key_file().save(&key_path).unwrap();

        assert!(cmd_sign(Some(keypair.secret_hex()), Some(key_path), Some(1), None).is_err());
    }
}
