//! Keypair CLI commands.

use anyhow::{Context, Result};
use stampsig_core::KeyPair;
use std::path::PathBuf;
use tracing::info;

/// Handle the `keygen` command.
///
/// Without an output path the private and public key are printed on two
/// lines, in the same form the demo prints them; the first line is accepted
/// by `sign --key`. With a path the pair is saved as a key file for
/// `sign --key-file`.
pub fn cmd_keygen(output: Option<PathBuf>) -> Result<()> {
    let keypair = KeyPair::generate().context("failed to generate keypair")?;

    match output {
        Some(path) => {
            keypair
                .to_key_file()
                .save(&path)
                .with_context(|| format!("failed to write key file to {}", path.display()))?;
            info!(public_key = %keypair.public_hex(), path = %path.display(), "wrote key file");
            println!("{}", keypair.public_hex());
        }
        None => {
            println!("{}", keypair.secret_hex());
            println!("{}", keypair.public_hex());
        }
    }

    Ok(())
}
