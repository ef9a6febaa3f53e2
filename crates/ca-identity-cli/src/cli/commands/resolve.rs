//! `caid resolve` - Resolve a reference against the CA URL.

use anyhow::Result;

use super::Context;
use crate::cli::args::ResolveArgs;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: &ResolveArgs) -> Result<()> {
    let client = ctx.client()?;
    let url = client.resolve(&args.reference);

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "base": client.base_url().as_str(),
                    "reference": args.reference,
                    "url": url.as_str(),
                })
            );
        }
        OutputFormat::Pretty => println!("{url}"),
    }

    Ok(())
}
