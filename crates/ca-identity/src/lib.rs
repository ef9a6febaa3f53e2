//! Bootstrap a mutual-TLS HTTP client for a certificate authority.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ca_identity::{load_client, BootstrapConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // $STEPPATH/config/{identity,defaults}.json, or ~/.step/config/...
//!     let client = load_client(&BootstrapConfig::from_env()?)?;
//!
//!     println!("CA: {}", client.base_url());
//!     println!("Roots: {}", client.trust_bundle().len());
//!
//!     let response = client.get("/health").send().await?;
//!     println!("Status: {}", response.status());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Files
//!
//! - identity: `{"type": "...", "crt": "<PEM certificate>", "key": "<PEM key>"}`
//! - defaults: `{"ca-url": "<URL>", "fingerprint": "...", "root": "<PEM bundle>"}`

#![doc(html_root_url = "https://docs.rs/ca-identity/0.1.0")]

// Re-export records, paths and errors
pub use ca_identity_core::*;

// Re-export the client
pub use ca_identity_client::{
    client_config, fingerprint, load_client, resolve_reference, CaClient, CaClientBuilder,
    CertificateSummary, ClientIdentity, Reference, TransportConfig, TrustBundle,
};

// Re-export transport crates for convenience
pub use reqwest;
pub use url;
