//! `caid show` - Bootstrap and describe the resulting client.

use anyhow::Result;
use ca_identity::CertificateSummary;
use chrono::Utc;
use colored::Colorize;

use super::Context;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let bundle = client.trust_bundle();
    let fingerprint_in_bundle = client.fingerprint().map(|fp| bundle.contains_fingerprint(fp));

    match ctx.output_format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "ca_url": client.base_url().as_str(),
                "identity": {
                    "chain_len": client.identity().certificate_chain().len(),
                    "certificate": client.identity().summary(),
                },
                "roots": bundle.summaries(),
                "fingerprint": client.fingerprint(),
                "fingerprint_in_bundle": fingerprint_in_bundle,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Pretty => {
            println!("{} {}", "CA URL:".bold(), client.base_url().as_str().cyan());
            println!();

            println!("{}", "Identity:".bold());
            print_summary(client.identity().summary());
            println!(
                "    {} {}",
                "chain:".dimmed(),
                client.identity().certificate_chain().len()
            );
            println!();

            println!(
                "{} {} from {}",
                "Trust bundle:".bold(),
                bundle.len(),
                bundle.source().display()
            );
            for summary in bundle.summaries() {
                print_summary(summary);
            }

            if let Some(fp) = client.fingerprint() {
                println!();
                let status = match fingerprint_in_bundle {
                    Some(true) => "matches a bundle certificate".green(),
                    _ => "not found in bundle".yellow(),
                };
                println!("{} {} ({})", "Fingerprint:".bold(), fp, status);
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &CertificateSummary) {
    let validity = if summary.is_expired_at(Utc::now()) {
        "expired".red()
    } else {
        "valid".green()
    };
    println!("  - {}", summary.subject);
    println!("    {} {}", "issuer:".dimmed(), summary.issuer);
    println!(
        "    {} {} .. {} ({})",
        "validity:".dimmed(),
        summary.not_before.to_rfc3339(),
        summary.not_after.to_rfc3339(),
        validity
    );
    println!("    {} {}", "sha256:".dimmed(), summary.fingerprint);
}
