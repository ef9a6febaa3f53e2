//! `caid init` - Write the identity and defaults records.

use anyhow::{bail, Result};
use ca_identity::{ClientIdentity, DefaultsRecord, IdentityRecord, TrustBundle};
use colored::Colorize;
use tracing::info;

use super::Context;
use crate::cli::args::InitArgs;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: &InitArgs) -> Result<()> {
    let identity = IdentityRecord::new(&args.crt, &args.key).with_type(&args.identity_type);
    let mut defaults = DefaultsRecord::new(&args.ca_url, &args.root);
    if let Some(fp) = &args.fingerprint {
        defaults = defaults.with_fingerprint(fp);
    }

    // Refuse to persist anything bootstrap would reject.
    identity.validate()?;
    defaults.validate()?;
    let ca_url = defaults.parse_ca_url()?;
    ClientIdentity::load(&identity)?;
    let bundle = TrustBundle::load(&defaults.root_bundle_path)?;

    let paths = &ctx.paths;
    if !args.force {
        for path in [&paths.identity_file, &paths.defaults_file] {
            if path.exists() {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
        }
    }

    identity.save(&paths.identity_file)?;
    defaults.save(&paths.defaults_file)?;
    info!(
        identity = %paths.identity_file.display(),
        defaults = %paths.defaults_file.display(),
        "wrote records"
    );

    let fingerprint_in_bundle = args.fingerprint.as_deref().map(|fp| bundle.contains_fingerprint(fp));

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "identity": paths.identity_file.display().to_string(),
                    "defaults": paths.defaults_file.display().to_string(),
                    "ca_url": ca_url.as_str(),
                    "roots": bundle.len(),
                    "fingerprint_in_bundle": fingerprint_in_bundle,
                })
            );
        }
        OutputFormat::Pretty => {
            println!("{} {}", "Wrote".green(), paths.identity_file.display());
            println!("{} {}", "Wrote".green(), paths.defaults_file.display());
            if fingerprint_in_bundle == Some(false) {
                println!(
                    "{} fingerprint does not match any certificate in {}",
                    "warning:".yellow(),
                    args.root.display()
                );
            }
        }
    }

    Ok(())
}
