use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{IdentityError, Result};

/// The persisted identity: where to find the client certificate and its key.
///
/// Persisted form:
///
/// ```json
/// {"type": "mTLS", "crt": "/path/to/identity.crt", "key": "/path/to/identity_key"}
/// ```
///
/// `type` is carried through untouched; nothing in bootstrap interprets it.
/// Missing `crt`/`key` fields deserialize as empty paths and are caught by
/// [`IdentityRecord::validate`] rather than by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Opaque identity type discriminator
    #[serde(rename = "type", default)]
    pub identity_type: String,

    /// PEM certificate (leaf first, optionally followed by its chain)
    #[serde(rename = "crt", default)]
    pub certificate_path: PathBuf,

    /// PEM private key
    #[serde(rename = "key", default)]
    pub key_path: PathBuf,
}

impl IdentityRecord {
    /// Create a record for the given certificate and key paths.
    pub fn new(certificate_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            identity_type: String::new(),
            certificate_path: certificate_path.into(),
            key_path: key_path.into(),
        }
    }

    /// Set the opaque type discriminator.
    #[must_use]
    pub fn with_type(mut self, identity_type: impl Into<String>) -> Self {
        self.identity_type = identity_type.into();
        self
    }

    /// Read and parse an identity file.
    ///
    /// Fails with `NotFound` when the file is absent and `Malformed` when it
    /// is not JSON of the expected shape. Does not validate.
    pub fn load(path: &Path) -> Result<Self> {
        super::read_json(path)
    }

    /// Write this record to `path` as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        super::write_json(path, self)
    }

    /// Check that both paths are present. Performs no I/O.
    pub fn validate(&self) -> Result<()> {
        if self.certificate_path.as_os_str().is_empty() {
            return Err(IdentityError::InvalidConfig("crt required".into()));
        }
        if self.key_path.as_os_str().is_empty() {
            return Err(IdentityError::InvalidConfig("key required".into()));
        }
        Ok(())
    }
}
