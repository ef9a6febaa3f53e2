//! `caid paths` - Show which record files are in effect.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context) -> Result<()> {
    let identity = &ctx.paths.identity_file;
    let defaults = &ctx.paths.defaults_file;

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "identity": identity.display().to_string(),
                    "identity_exists": identity.exists(),
                    "defaults": defaults.display().to_string(),
                    "defaults_exists": defaults.exists(),
                })
            );
        }
        OutputFormat::Pretty => {
            for (label, path) in [("identity:", identity), ("defaults:", defaults)] {
                let marker = if path.exists() {
                    "".normal()
                } else {
                    " (missing)".red()
                };
                println!("  {} {}{}", label.bold(), path.display(), marker);
            }
        }
    }

    Ok(())
}
