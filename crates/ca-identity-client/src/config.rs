//! Transport configuration types.

use std::time::Duration;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings applied to the HTTP transport, independent of TLS material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whole-request timeout
    pub timeout: Duration,

    /// Value of the User-Agent header
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("ca-identity/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}
