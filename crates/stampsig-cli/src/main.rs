use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stampsig_cli::commands::{demo, keys, stamp};
use stampsig_cli::logging;

/// Sign the current time with a fresh Ed25519 key and check the signature.
#[derive(Parser, Debug)]
#[command(name = "stampsig", version)]
struct Cli {
    /// Show debug logs on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Capture, encode, sign and verify the current timestamp (default).
    Demo {
        /// Print the date in UTC instead of local time.
        #[arg(long)]
        utc: bool,
    },
    /// Generate a new Ed25519 keypair.
    Keygen {
        /// Write a key file here (default: print private and public key)
        output: Option<PathBuf>,
    },
    /// Sign a timestamp and emit the signed record as JSON.
    Sign {
        /// Hex-encoded 32-byte private key (default: a fresh key)
        #[arg(long)]
        key: Option<String>,
        /// Key file written by `keygen OUTPUT`
        #[arg(long, conflicts_with = "key")]
        key_file: Option<PathBuf>,
        /// Seconds since the Unix epoch (default: now, rounded)
        #[arg(long)]
        timestamp: Option<u64>,
        /// Write the record to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Verify a signed record; prints `ok` or `ng`.
    Verify {
        /// Path to the signed record (.json)
        file: PathBuf,
        /// Require the record to be signed by this hex-encoded public key
        #[arg(long)]
        public_key: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command.unwrap_or(Commands::Demo { utc: false }) {
        Commands::Demo { utc } => demo::cmd_demo(utc)?,
        Commands::Keygen { output } => keys::cmd_keygen(output)?,
        Commands::Sign {
            key,
            key_file,
            timestamp,
            output,
        } => stamp::cmd_sign(key, key_file, timestamp, output)?,
        Commands::Verify { file, public_key } => {
            if !stamp::cmd_verify(file, public_key)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
