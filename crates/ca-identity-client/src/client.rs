//! The bootstrapped CA client.

use reqwest::{Client as HttpClient, Method, RequestBuilder};
use rustls::ClientConfig;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use ca_identity_core::{BootstrapConfig, DefaultsRecord, IdentityRecord, Result};

use crate::config::TransportConfig;
use crate::identity::ClientIdentity;
use crate::reference::{resolve_reference, Reference};
use crate::tls;
use crate::trust::TrustBundle;

/// HTTP client anchored to a CA base URL and authenticated by mutual TLS.
///
/// Cloning is cheap and every clone shares the same transport.
#[derive(Clone)]
pub struct CaClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: Url,
    http: HttpClient,
    tls: Arc<ClientConfig>,
    identity: ClientIdentity,
    trust_bundle: TrustBundle,
    fingerprint: Option<String>,
}

impl CaClient {
    /// Bootstrap from the given record locations with default transport settings
    pub fn load(config: &BootstrapConfig) -> Result<Self> {
        CaClientBuilder::new(config.clone()).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(config: BootstrapConfig) -> CaClientBuilder {
        CaClientBuilder::new(config)
    }

    /// The parsed `ca-url`
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The underlying mutual-TLS HTTP client
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    /// The TLS configuration the transport was built from
    #[must_use]
    pub fn tls_config(&self) -> &Arc<ClientConfig> {
        &self.inner.tls
    }

    /// The identity presented to the server
    #[must_use]
    pub fn identity(&self) -> &ClientIdentity {
        &self.inner.identity
    }

    /// The anchors used to authenticate the server
    #[must_use]
    pub fn trust_bundle(&self) -> &TrustBundle {
        &self.inner.trust_bundle
    }

    /// The opaque fingerprint from the defaults record
    #[must_use]
    pub fn fingerprint(&self) -> Option<&str> {
        self.inner.fingerprint.as_deref()
    }

    /// Resolve a reference against the base URL. Never fails.
    #[must_use]
    pub fn resolve_reference(&self, reference: &Reference) -> Url {
        resolve_reference(&self.inner.base_url, reference)
    }

    /// Resolve a string reference such as `"/roots?format=pem"`
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Url {
        self.resolve_reference(&Reference::from(reference))
    }

    /// Start a request of any method against a resolved reference
    pub fn request(&self, method: Method, reference: &str) -> RequestBuilder {
        let url = self.resolve(reference);
        debug!(method = %method, url = %url, "request");
        self.inner.http.request(method, url)
    }

    /// Start a GET request
    pub fn get(&self, reference: &str) -> RequestBuilder {
        self.request(Method::GET, reference)
    }

    /// Start a POST request
    pub fn post(&self, reference: &str) -> RequestBuilder {
        self.request(Method::POST, reference)
    }
}

impl fmt::Debug for CaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("identity", &self.inner.identity)
            .field("roots", &self.inner.trust_bundle.len())
            .field("fingerprint", &self.inner.fingerprint)
            .finish_non_exhaustive()
    }
}

/// Builder for bootstrapping a [`CaClient`]
#[derive(Debug, Clone)]
pub struct CaClientBuilder {
    config: BootstrapConfig,
    transport: TransportConfig,
}

impl CaClientBuilder {
    /// Create a builder reading from the given record locations
    #[must_use]
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            transport: TransportConfig::default(),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.timeout(timeout);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.transport = self.transport.user_agent(agent);
        self
    }

    /// Replace all transport settings
    #[must_use]
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Run the bootstrap.
    ///
    /// The identity is loaded first; if it fails, the defaults file is never
    /// read. Only the first failure is returned and nothing is returned
    /// alongside it.
    pub fn build(self) -> Result<CaClient> {
        let identity_record = IdentityRecord::load(&self.config.identity_file)?;
        let identity = ClientIdentity::load(&identity_record)?;
        debug!(subject = %identity.summary().subject, "identity ready");

        let defaults = DefaultsRecord::load(&self.config.defaults_file)?;
        defaults.validate()?;
        let base_url = defaults.parse_ca_url()?;
        let trust_bundle = TrustBundle::load(&defaults.root_bundle_path)?;
        debug!(roots = trust_bundle.len(), "trust bundle ready");

        let tls = tls::client_config(&identity, &trust_bundle)?;
        let http = tls::http_client(&tls, &self.transport)?;

        info!(ca_url = %base_url, roots = trust_bundle.len(), "CA client ready");
        Ok(CaClient {
            inner: Arc::new(ClientInner {
                base_url,
                http,
                tls,
                identity,
                trust_bundle,
                fingerprint: defaults.fingerprint,
            }),
        })
    }
}

/// Bootstrap a [`CaClient`] from the given record locations.
pub fn load_client(config: &BootstrapConfig) -> Result<CaClient> {
    CaClient::load(config)
}
