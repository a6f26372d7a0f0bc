//! Payment token decryption binary.
//!
//! # Usage
//!
//! ```bash
//! # Android Pay
//! paytoken --token token.json --private-key merchant.pem
//!
//! # Google Pay
//! paytoken --token token.json --private-key merchant.pem \
//!     --recipient-id merchant:12345678901234567890 --verification-keys keys.json
//! ```
//!
//! The plaintext is written to stdout as-is; logs go to stderr.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use paytoken_core::{
    DecryptableToken, DecryptionConfig, Token, TokenAttributes, TokenError, VerificationKeySet,
};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Payment token decryption
#[derive(Parser, Debug)]
#[command(name = "paytoken")]
#[command(about = "Verify and decrypt Google Pay and Android Pay payment tokens")]
#[command(version)]
struct Args {
    /// Path to the token JSON as received from the wallet
    #[arg(short, long)]
    token: PathBuf,

    /// Path to the merchant private key (PKCS#8 PEM, SEC1 PEM or base64 DER)
    #[arg(short = 'k', long)]
    private_key: PathBuf,

    /// Recipient id the token was issued to (Google Pay only)
    #[arg(short, long, default_value = "")]
    recipient_id: String,

    /// Path to the issuer verification keys JSON (Google Pay only)
    #[arg(short = 'v', long)]
    verification_keys: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Token(#[from] TokenError),
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn load_config(args: &Args) -> Result<DecryptionConfig, CliError> {
    let keys = match &args.verification_keys {
        Some(path) => VerificationKeySet::from_json(&read(path)?)?,
        None => VerificationKeySet::default(),
    };
    Ok(DecryptionConfig::new(args.recipient_id.as_str(), keys))
}

fn run(args: &Args) -> Result<Vec<u8>, CliError> {
    let attributes = TokenAttributes::from_json(&read(&args.token)?)?;
    let config = load_config(args)?;
    let private_key = read(&args.private_key)?;

    let token = Token::build(attributes, config)?;
    tracing::info!(family = %token.family(), "decrypting token");

    Ok(token.decrypt(&private_key)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    tracing::debug!(version = paytoken_core::VERSION, "paytoken starting");

    let plaintext = run(&args)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&plaintext)?;
    stdout.flush()?;

    Ok(())
}
