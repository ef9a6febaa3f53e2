//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use ca_identity::BootstrapConfig;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let paths = resolve_paths(&cli)?;

    // Create context for commands
    let ctx = commands::Context {
        paths,
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Show => commands::show::execute(&ctx),
        Commands::Resolve(args) => commands::resolve::execute(&ctx, &args),
        Commands::Paths => commands::paths::execute(&ctx),
        Commands::Init(args) => commands::init::execute(&ctx, &args),
        Commands::Get(args) => commands::get::execute(&ctx, &args).await,
    }
}

/// Explicit files win, then `--step-path`, then `$STEPPATH` / `~/.step`.
fn resolve_paths(cli: &Cli) -> Result<BootstrapConfig> {
    let base = match (&cli.identity_file, &cli.defaults_file, &cli.step_path) {
        (Some(identity), Some(defaults), _) => {
            return Ok(BootstrapConfig::new(identity, defaults));
        }
        (_, _, Some(step_path)) => BootstrapConfig::from_step_path(step_path),
        _ => BootstrapConfig::from_env()?,
    };

    let mut paths = base;
    if let Some(identity) = &cli.identity_file {
        paths = paths.identity_file(identity);
    }
    if let Some(defaults) = &cli.defaults_file {
        paths = paths.defaults_file(defaults);
    }
    Ok(paths)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "ca_identity_cli=debug,ca_identity_client=debug,ca_identity_core=debug"
    } else {
        "ca_identity_cli=info,ca_identity_client=warn,ca_identity_core=warn"
    };

    // A subscriber may already be installed when run() is called twice in-process.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
