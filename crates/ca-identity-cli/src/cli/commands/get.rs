//! `caid get` - One GET request over mutual TLS.

use anyhow::Result;
use colored::Colorize;
use std::time::Duration;
use tracing::debug;

use super::Context;
use crate::cli::args::GetArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: &Context, args: &GetArgs) -> Result<()> {
    let client = ctx.client_with_timeout(Some(Duration::from_secs(args.timeout)))?;
    let url = client.resolve(&args.reference);
    debug!(url = %url, "sending request");

    let response = client.get(&args.reference).send().await?;
    let status = response.status();
    let body = response.text().await?;

    match ctx.output_format {
        OutputFormat::Json => {
            let parsed_body = serde_json::from_str::<serde_json::Value>(&body)
                .unwrap_or(serde_json::Value::String(body));
            println!(
                "{}",
                serde_json::json!({
                    "url": url.as_str(),
                    "status": status.as_u16(),
                    "body": parsed_body,
                })
            );
        }
        OutputFormat::Pretty => {
            let line = format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or(""));
            if status.is_success() {
                println!("{}", line.green());
            } else {
                println!("{}", line.red());
            }
            if ctx.verbose {
                println!("{} {}", "url:".dimmed(), url);
            }
            println!("{body}");
        }
    }

    if !status.is_success() {
        anyhow::bail!("request failed with status {}", status.as_u16());
    }
    Ok(())
}
