//! caid - mutual-TLS CA client bootstrap tool
//!
//! Loads the identity and defaults records and reports what the resulting
//! client would present and trust.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ca_identity_cli::run().await
}
