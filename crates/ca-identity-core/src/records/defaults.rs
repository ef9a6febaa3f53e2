use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{IdentityError, Result};

/// Scheme assumed when `ca-url` is written without one.
const DEFAULT_SCHEME: &str = "https";

/// The persisted defaults: which CA to talk to and which roots to trust.
///
/// Persisted form:
///
/// ```json
/// {"ca-url": "https://ca.example.com", "fingerprint": "a1b2...", "root": "/path/to/root_ca.crt"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsRecord {
    /// Base URL of the certificate authority
    #[serde(rename = "ca-url", default)]
    pub ca_url: String,

    /// Opaque root fingerprint, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// PEM bundle of trusted root certificates
    #[serde(rename = "root", default)]
    pub root_bundle_path: PathBuf,
}

impl DefaultsRecord {
    /// Create a record for the given CA URL and root bundle.
    pub fn new(ca_url: impl Into<String>, root_bundle_path: impl Into<PathBuf>) -> Self {
        Self {
            ca_url: ca_url.into(),
            fingerprint: None,
            root_bundle_path: root_bundle_path.into(),
        }
    }

    /// Attach a fingerprint.
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// Read and parse a defaults file. Does not validate.
    pub fn load(path: &Path) -> Result<Self> {
        super::read_json(path)
    }

    /// Write this record to `path` as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        super::write_json(path, self)
    }

    /// Check required fields. Performs no I/O.
    ///
    /// `ca-url` is checked before `root`, so a record missing both reports
    /// the URL.
    pub fn validate(&self) -> Result<()> {
        if self.ca_url.is_empty() {
            return Err(IdentityError::InvalidConfig("ca-url required".into()));
        }
        if self.root_bundle_path.as_os_str().is_empty() {
            return Err(IdentityError::InvalidConfig("root required".into()));
        }
        Ok(())
    }

    /// Parse `ca-url` into an absolute `http`/`https` URL.
    ///
    /// A value with no scheme gets `https://` prepended, so `ca.local:9000`
    /// means `https://ca.local:9000`. Anything that still does not parse, or
    /// lacks a host, is `Malformed`.
    pub fn parse_ca_url(&self) -> Result<Url> {
        let raw = self.ca_url.trim();
        let parsed = if has_scheme(raw) {
            Url::parse(raw)
        } else {
            Url::parse(&format!("{DEFAULT_SCHEME}://{raw}"))
        };

        let url = parsed.map_err(|e| IdentityError::malformed_field(CA_URL_FIELD, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(IdentityError::malformed_field(
                CA_URL_FIELD,
                format!("unsupported scheme {:?}", url.scheme()),
            ));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(IdentityError::malformed_field(CA_URL_FIELD, "missing host"));
        }
        Ok(url)
    }
}

const CA_URL_FIELD: &str = "ca-url";

/// `://` only counts as a scheme separator ahead of any path, query or fragment.
fn has_scheme(raw: &str) -> bool {
    raw.find("://")
        .is_some_and(|idx| !raw[..idx].contains(['/', '?', '#']))
}
