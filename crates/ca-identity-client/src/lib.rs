//! Mutual-TLS client bootstrap.
//!
//! This crate turns the two on-disk records into a ready [`CaClient`]:
//!
//! ```text
//! identity.json ──► ClientIdentity ─┐
//!                                   ├─► rustls ClientConfig ─► reqwest::Client ─► CaClient
//! defaults.json ──► TrustBundle ────┘                                  (+ ca-url)
//! ```
//!
//! Either a fully built client comes back or an error does; nothing
//! half-assembled ever escapes.
//!
//! # Example
//!
//! ```rust,ignore
//! use ca_identity_client::{load_client, BootstrapConfig};
//!
//! let client = load_client(&BootstrapConfig::from_env()?)?;
//! let url = client.resolve("/roots?format=pem");
//! let response = client.get("/health").send().await?;
//! ```

#![doc(html_root_url = "https://docs.rs/ca-identity-client/0.1.0")]

mod certificate;
mod client;
mod config;
mod identity;
mod reference;
mod tls;
mod trust;

pub use certificate::{fingerprint, CertificateSummary};
pub use client::{load_client, CaClient, CaClientBuilder};
pub use config::TransportConfig;
pub use identity::ClientIdentity;
pub use reference::{resolve_reference, Reference};
pub use tls::client_config;
pub use trust::TrustBundle;

pub use ca_identity_core::{
    BootstrapConfig, DefaultsRecord, ErrorKind, IdentityError, IdentityRecord, Result,
};
