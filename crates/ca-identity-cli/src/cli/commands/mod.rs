//! Command implementations.

pub mod get;
pub mod init;
pub mod paths;
pub mod resolve;
pub mod show;

use anyhow::Context as _;
use ca_identity::{BootstrapConfig, CaClient};
use std::time::Duration;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Record locations
    pub paths: BootstrapConfig,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Bootstrap a client from the configured records.
    pub fn client(&self) -> anyhow::Result<CaClient> {
        self.client_with_timeout(None)
    }

    /// Bootstrap a client, overriding the request timeout.
    pub fn client_with_timeout(&self, timeout: Option<Duration>) -> anyhow::Result<CaClient> {
        let mut builder = CaClient::builder(self.paths.clone())
            .user_agent(format!("caid/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().with_context(|| {
            format!(
                "failed to bootstrap CA client from {} and {}",
                self.paths.identity_file.display(),
                self.paths.defaults_file.display()
            )
        })
    }
}
