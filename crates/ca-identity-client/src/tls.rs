//! rustls and reqwest assembly. Pure in-memory configuration; no network I/O.

use reqwest::Client as HttpClient;
use rustls::ClientConfig;
use std::sync::Arc;
use tracing::debug;

use ca_identity_core::{IdentityError, Result};

use crate::config::TransportConfig;
use crate::identity::ClientIdentity;
use crate::trust::TrustBundle;

const ALPN_HTTP1: &[u8] = b"http/1.1";

/// Build a rustls client configuration that presents `identity` and trusts
/// only the anchors in `bundle`.
pub fn client_config(identity: &ClientIdentity, bundle: &TrustBundle) -> Result<Arc<ClientConfig>> {
    let roots = bundle.root_store()?;
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let mut config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| IdentityError::Transport(e.to_string()))?
        .with_root_certificates(roots)
        .with_client_auth_cert(identity.certificate_chain().to_vec(), identity.private_key())
        .map_err(|e| IdentityError::InvalidKeyPair(e.to_string()))?;
    config.alpn_protocols = vec![ALPN_HTTP1.to_vec()];

    debug!(
        roots = bundle.len(),
        chain = identity.certificate_chain().len(),
        "assembled mutual TLS configuration"
    );
    Ok(Arc::new(config))
}

/// Wrap a TLS configuration in a reqwest client.
///
/// The client is internally reference-counted and holds no per-request
/// state, so one instance serves any number of concurrent requests.
pub(crate) fn http_client(tls: &ClientConfig, transport: &TransportConfig) -> Result<HttpClient> {
    HttpClient::builder()
        .use_preconfigured_tls(tls.clone())
        .timeout(transport.timeout)
        .user_agent(&transport.user_agent)
        .gzip(true)
        .build()
        .map_err(|e| IdentityError::Transport(e.to_string()))
}
