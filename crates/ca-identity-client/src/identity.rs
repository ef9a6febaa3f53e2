//! The client certificate and key presented during the handshake.

use rustls::crypto::CryptoProvider;
use rustls::pki_types::{
    CertificateDer, PrivateKeyDer, PrivatePkcs1KeyDer, PrivatePkcs8KeyDer, PrivateSec1KeyDer,
};
use rustls::sign::SigningKey;
use std::fmt;
use std::path::Path;
use tracing::debug;
use x509_parser::prelude::{FromDer, SubjectPublicKeyInfo};

use ca_identity_core::{IdentityError, IdentityRecord, Result};

use crate::certificate::CertificateSummary;

/// A parsed certificate chain together with its matching private key.
pub struct ClientIdentity {
    chain: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
    summary: CertificateSummary,
}

impl ClientIdentity {
    /// Load the files an identity record points at.
    ///
    /// Missing files are `NotFound`; anything unparseable or mismatched is
    /// `InvalidKeyPair`.
    pub fn load(record: &IdentityRecord) -> Result<Self> {
        record.validate()?;
        let cert_pem = read(&record.certificate_path)?;
        let key_pem = read(&record.key_path)?;
        debug!(
            crt = %record.certificate_path.display(),
            key = %record.key_path.display(),
            "loaded identity material"
        );
        Self::from_pem(&cert_pem, &key_pem)
    }

    /// Parse a PEM certificate chain (leaf first) and a PEM private key.
    pub fn from_pem(cert_pem: &[u8], key_pem: &[u8]) -> Result<Self> {
        let chain = parse_chain(cert_pem)?;
        let key = parse_key(key_pem)?;

        let (_, leaf) = x509_parser::parse_x509_certificate(&chain[0])
            .map_err(|e| IdentityError::InvalidKeyPair(format!("certificate: {e}")))?;
        ensure_key_matches(leaf.public_key(), &key)?;

        let summary = CertificateSummary::new(&leaf, &chain[0]);
        Ok(Self {
            chain,
            key,
            summary,
        })
    }

    /// Certificate chain as presented to the server, leaf first
    #[must_use]
    pub fn certificate_chain(&self) -> &[CertificateDer<'static>] {
        &self.chain
    }

    /// The leaf certificate
    #[must_use]
    pub fn leaf(&self) -> &CertificateDer<'static> {
        &self.chain[0]
    }

    /// Details of the leaf certificate
    #[must_use]
    pub fn summary(&self) -> &CertificateSummary {
        &self.summary
    }

    pub(crate) fn private_key(&self) -> PrivateKeyDer<'static> {
        self.key.clone_key()
    }
}

impl Clone for ClientIdentity {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            key: self.key.clone_key(),
            summary: self.summary.clone(),
        }
    }
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("subject", &self.summary.subject)
            .field("chain_len", &self.chain.len())
            .field("key", &"<redacted>")
            .finish()
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| IdentityError::io(path, e))
}

fn parse_chain(content: &[u8]) -> Result<Vec<CertificateDer<'static>>> {
    let blocks = pem::parse_many(content)
        .map_err(|e| IdentityError::InvalidKeyPair(format!("certificate: {e}")))?;

    let mut chain = Vec::new();
    for block in blocks.into_iter().filter(|b| b.tag() == "CERTIFICATE") {
        let der = block.into_contents();
        x509_parser::parse_x509_certificate(&der).map_err(|e| {
            IdentityError::InvalidKeyPair(format!("certificate {}: {e}", chain.len()))
        })?;
        chain.push(CertificateDer::from(der));
    }

    if chain.is_empty() {
        return Err(IdentityError::InvalidKeyPair(
            "no certificate found in certificate file".into(),
        ));
    }
    Ok(chain)
}

fn parse_key(content: &[u8]) -> Result<PrivateKeyDer<'static>> {
    let blocks =
        pem::parse_many(content).map_err(|e| IdentityError::InvalidKeyPair(format!("key: {e}")))?;

    for block in blocks {
        let key: PrivateKeyDer<'static> = match block.tag() {
            "PRIVATE KEY" => PrivatePkcs8KeyDer::from(block.into_contents()).into(),
            "EC PRIVATE KEY" => PrivateSec1KeyDer::from(block.into_contents()).into(),
            "RSA PRIVATE KEY" => PrivatePkcs1KeyDer::from(block.into_contents()).into(),
            "ENCRYPTED PRIVATE KEY" => {
                return Err(IdentityError::InvalidKeyPair(
                    "encrypted private keys are not supported".into(),
                ))
            }
            _ => continue,
        };
        return Ok(key);
    }

    Err(IdentityError::InvalidKeyPair(
        "no private key found in key file".into(),
    ))
}

/// The certificate's public key must be the one derived from `key`.
fn ensure_key_matches(
    cert_spki: &SubjectPublicKeyInfo<'_>,
    key: &PrivateKeyDer<'static>,
) -> Result<()> {
    let provider = rustls::crypto::ring::default_provider();
    let signing_key = load_signing_key(&provider, key)?;

    let Some(spki_der) = signing_key.public_key() else {
        debug!(algorithm = ?signing_key.algorithm(), "cannot derive public key, skipping match check");
        return Ok(());
    };
    let (_, key_spki) = SubjectPublicKeyInfo::from_der(spki_der.as_ref())
        .map_err(|e| IdentityError::InvalidKeyPair(format!("key: {e}")))?;

    let cert_bits: &[u8] = &cert_spki.subject_public_key.data;
    let key_bits: &[u8] = &key_spki.subject_public_key.data;
    if cert_bits != key_bits {
        return Err(IdentityError::InvalidKeyPair(
            "private key does not match certificate public key".into(),
        ));
    }
    Ok(())
}

fn load_signing_key(
    provider: &CryptoProvider,
    key: &PrivateKeyDer<'static>,
) -> Result<std::sync::Arc<dyn SigningKey>> {
    provider
        .key_provider
        .load_private_key(key.clone_key())
        .map_err(|e| IdentityError::InvalidKeyPair(format!("key: {e}")))
}
