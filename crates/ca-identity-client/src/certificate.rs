//! X.509 inspection shared by the trust bundle and the client identity.

use chrono::{DateTime, TimeZone, Utc};
use ring::digest::{digest, SHA256};
use serde::Serialize;
use x509_parser::certificate::X509Certificate;

/// Human-facing details of one certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSummary {
    /// Subject distinguished name
    pub subject: String,
    /// Issuer distinguished name
    pub issuer: String,
    /// Serial number (colon-separated hex)
    pub serial: String,
    /// Not valid before
    pub not_before: DateTime<Utc>,
    /// Not valid after
    pub not_after: DateTime<Utc>,
    /// SHA-256 of the DER encoding, lowercase hex
    pub fingerprint: String,
}

impl CertificateSummary {
    /// Summarize a parsed certificate whose DER encoding is `der`.
    pub(crate) fn new(cert: &X509Certificate<'_>, der: &[u8]) -> Self {
        Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial: cert.raw_serial_as_string(),
            not_before: asn1_to_utc(cert.validity().not_before),
            not_after: asn1_to_utc(cert.validity().not_after),
            fingerprint: fingerprint(der),
        }
    }

    /// Returns true if `now` falls outside the validity window
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now < self.not_before || now > self.not_after
    }
}

/// SHA-256 fingerprint of a DER-encoded certificate, lowercase hex.
#[must_use]
pub fn fingerprint(der: &[u8]) -> String {
    hex::encode(digest(&SHA256, der).as_ref())
}

/// Normalize a user-supplied fingerprint: lowercase, no separators.
pub(crate) fn normalize_fingerprint(fp: &str) -> String {
    fp.chars()
        .filter(|c| !matches!(c, ':' | ' ' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn asn1_to_utc(t: x509_parser::time::ASN1Time) -> DateTime<Utc> {
    Utc.timestamp_opt(t.timestamp(), 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        assert_eq!(
            fingerprint(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_normalize_fingerprint() {
        assert_eq!(normalize_fingerprint("AB:cd:EF"), "abcdef");
        assert_eq!(normalize_fingerprint("ab cd-ef"), "abcdef");
    }

    #[test]
    fn test_summary_of_generated_cert() {
        let key = rcgen::KeyPair::generate().unwrap();
        let params = rcgen::CertificateParams::new(vec!["ca.local".to_string()]).unwrap();
        let cert = params.self_signed(&key).unwrap();
        let der = cert.der().to_vec();

        let (_, parsed) = x509_parser::parse_x509_certificate(&der).unwrap();
        let summary = CertificateSummary::new(&parsed, &der);
        assert_eq!(summary.fingerprint, fingerprint(&der));
        assert_eq!(summary.subject, summary.issuer);
        assert!(!summary.is_expired_at(Utc::now()));
        assert!(summary.is_expired_at(summary.not_after + chrono::Duration::days(1)));
    }
}
