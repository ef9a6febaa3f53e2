//! The root trust bundle named by the defaults record.

use rustls::pki_types::CertificateDer;
use rustls::RootCertStore;
use std::path::{Path, PathBuf};
use tracing::debug;

use ca_identity_core::{IdentityError, Result};

use crate::certificate::{normalize_fingerprint, CertificateSummary};

const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// CA certificates used to authenticate the server.
///
/// Only these anchors are trusted; the system store is never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustBundle {
    source: PathBuf,
    certificates: Vec<CertificateDer<'static>>,
    summaries: Vec<CertificateSummary>,
}

impl TrustBundle {
    /// Read a PEM bundle from disk.
    ///
    /// A missing file is `NotFound`; content yielding no valid certificate is
    /// `Malformed`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| IdentityError::io(path, e))?;
        Self::from_pem(path, &content)
    }

    /// Parse PEM content. `source` is only used for error reporting.
    pub fn from_pem(source: impl Into<PathBuf>, content: &[u8]) -> Result<Self> {
        let source = source.into();
        let blocks = pem::parse_many(content).map_err(|e| IdentityError::malformed(&source, e))?;

        let mut certificates = Vec::new();
        let mut summaries = Vec::new();
        for block in blocks {
            if block.tag() != CERTIFICATE_TAG {
                debug!(path = %source.display(), tag = block.tag(), "skipping non-certificate PEM block");
                continue;
            }
            let der = block.into_contents();
            let (_, cert) = x509_parser::parse_x509_certificate(&der)
                .map_err(|e| IdentityError::malformed(&source, e))?;
            summaries.push(CertificateSummary::new(&cert, &der));
            certificates.push(CertificateDer::from(der));
        }

        if certificates.is_empty() {
            return Err(IdentityError::malformed(&source, "no certificates found"));
        }

        debug!(path = %source.display(), count = certificates.len(), "loaded trust bundle");
        Ok(Self {
            source,
            certificates,
            summaries,
        })
    }

    /// File the bundle was read from
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// DER certificates in file order
    #[must_use]
    pub fn certificates(&self) -> &[CertificateDer<'static>] {
        &self.certificates
    }

    /// Per-certificate details in file order
    #[must_use]
    pub fn summaries(&self) -> &[CertificateSummary] {
        &self.summaries
    }

    /// Number of certificates
    #[must_use]
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Always false for a loaded bundle
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// SHA-256 fingerprints in file order
    #[must_use]
    pub fn fingerprints(&self) -> Vec<&str> {
        self.summaries.iter().map(|s| s.fingerprint.as_str()).collect()
    }

    /// Whether `fp` (hex, any case, `:` separators allowed) names a bundle certificate.
    #[must_use]
    pub fn contains_fingerprint(&self, fp: &str) -> bool {
        let wanted = normalize_fingerprint(fp);
        !wanted.is_empty() && self.summaries.iter().any(|s| s.fingerprint == wanted)
    }

    /// Build a rustls root store holding exactly these anchors.
    pub fn root_store(&self) -> Result<RootCertStore> {
        let mut store = RootCertStore::empty();
        for cert in &self.certificates {
            store
                .add(cert.clone())
                .map_err(|e| IdentityError::malformed(&self.source, e))?;
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_identity_core::ErrorKind;

    fn ca_pem(name: &str) -> String {
        let key = rcgen::KeyPair::generate().unwrap();
        let mut params = rcgen::CertificateParams::new(Vec::<String>::new()).unwrap();
        params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
        params
            .distinguished_name
            .push(rcgen::DnType::CommonName, name);
        params.self_signed(&key).unwrap().pem()
    }

    #[test]
    fn test_parse_bundle_in_order() {
        let content = format!("{}{}", ca_pem("Root A"), ca_pem("Root B"));
        let bundle = TrustBundle::from_pem("roots.pem", content.as_bytes()).unwrap();
        assert_eq!(bundle.len(), 2);
        assert!(bundle.summaries()[0].subject.contains("Root A"));
        assert!(bundle.summaries()[1].subject.contains("Root B"));
        assert_eq!(bundle.root_store().unwrap().len(), 2);
    }

    #[test]
    fn test_skips_other_blocks() {
        let key = rcgen::KeyPair::generate().unwrap().serialize_pem();
        let content = format!("{key}{}", ca_pem("Root"));
        let bundle = TrustBundle::from_pem("roots.pem", content.as_bytes()).unwrap();
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn test_empty_bundle_is_malformed() {
        let err = TrustBundle::from_pem("roots.pem", b"not a certificate").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert_eq!(err.path(), Some(Path::new("roots.pem")));
    }

    #[test]
    fn test_garbage_certificate_is_malformed() {
        let block = pem::Pem::new("CERTIFICATE", vec![0x30, 0x03, 0x02, 0x01, 0x00]);
        let err = TrustBundle::from_pem("roots.pem", pem::encode(&block).as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrustBundle::load(&dir.path().join("root_ca.crt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_contains_fingerprint() {
        let bundle = TrustBundle::from_pem("roots.pem", ca_pem("Root").as_bytes()).unwrap();
        let fp = bundle.fingerprints()[0].to_uppercase();
        assert!(bundle.contains_fingerprint(&fp));
        assert!(!bundle.contains_fingerprint("deadbeef"));
        assert!(!bundle.contains_fingerprint(""));
    }
}
