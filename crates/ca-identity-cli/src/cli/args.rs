//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Bootstrap and inspect a mutual-TLS client for a certificate authority
///
/// Reads an identity record (client certificate and key) and a defaults
/// record (CA URL and root bundle), by default from
/// $STEPPATH/config or ~/.step/config.
#[derive(Parser, Debug)]
#[command(name = "caid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Identity record path
    #[arg(long, env = "CAID_IDENTITY_FILE", global = true)]
    pub identity_file: Option<PathBuf>,

    /// Defaults record path
    #[arg(long, env = "CAID_DEFAULTS_FILE", global = true)]
    pub defaults_file: Option<PathBuf>,

    /// Base configuration directory (records live under <DIR>/config)
    #[arg(long, env = "STEPPATH", global = true)]
    pub step_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bootstrap the client and show its identity and trust anchors
    Show,

    /// Resolve a reference (e.g. "/roots?format=pem") against the CA URL
    Resolve(ResolveArgs),

    /// Print the record locations in effect
    Paths,

    /// Write the identity and defaults records
    Init(InitArgs),

    /// Send one GET request over mutual TLS
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path with optional query and fragment
    pub reference: String,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Path with optional query
    pub reference: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Certificate authority URL
    #[arg(long)]
    pub ca_url: String,

    /// PEM bundle of trusted roots
    #[arg(long)]
    pub root: PathBuf,

    /// Root fingerprint to record
    #[arg(long)]
    pub fingerprint: Option<String>,

    /// PEM client certificate
    #[arg(long)]
    pub crt: PathBuf,

    /// PEM client private key
    #[arg(long)]
    pub key: PathBuf,

    /// Identity type to record
    #[arg(long = "type", default_value = "mTLS")]
    pub identity_type: String,

    /// Overwrite existing records
    #[arg(short, long)]
    pub force: bool,
}
