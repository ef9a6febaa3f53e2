//! Runtime-generated PKI fixtures laid out like a real configuration directory.

#![allow(dead_code)]

use ca_identity_client::{BootstrapConfig, DefaultsRecord, IdentityRecord};
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DnType, ExtendedKeyUsagePurpose, IsCa,
    KeyPair,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A root CA, a client certificate it signed, and both records on disk.
pub struct Fixture {
    pub dir: TempDir,
    pub root: Certificate,
    pub root_key: KeyPair,
    pub root_der: Vec<u8>,
    pub client_der: Vec<u8>,
    pub identity_file: PathBuf,
    pub defaults_file: PathBuf,
    pub root_file: PathBuf,
    pub crt_file: PathBuf,
    pub key_file: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_ca_url("https://127.0.0.1")
    }

    pub fn with_ca_url(ca_url: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();

        let (root, root_key) = root_ca("Test Root CA");

        let client_key = KeyPair::generate().unwrap();
        let mut client_params = CertificateParams::new(vec!["client.local".to_string()]).unwrap();
        client_params
            .distinguished_name
            .push(DnType::CommonName, "test-client");
        client_params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ClientAuth];
        let client = client_params
            .signed_by(&client_key, &root, &root_key)
            .unwrap();

        let root_file = write(base, "certs/root_ca.crt", &root.pem());
        let crt_file = write(base, "identity/identity.crt", &client.pem());
        let key_file = write(base, "identity/identity_key", &client_key.serialize_pem());

        let identity_file = base.join("config/identity.json");
        IdentityRecord::new(&crt_file, &key_file)
            .with_type("mTLS")
            .save(&identity_file)
            .unwrap();

        let defaults_file = base.join("config/defaults.json");
        DefaultsRecord::new(ca_url, &root_file)
            .with_fingerprint("ignored-by-bootstrap")
            .save(&defaults_file)
            .unwrap();

        write(base, "config/fail.json", "{\"crt\": [1, 2, 3");

        Self {
            root_der: root.der().to_vec(),
            client_der: client.der().to_vec(),
            root,
            root_key,
            dir,
            identity_file,
            defaults_file,
            root_file,
            crt_file,
            key_file,
        }
    }

    /// A server certificate for `name` issued by the fixture root.
    pub fn server_cert(&self, name: &str) -> ServerCert {
        ServerCert::issue(name, &self.root, &self.root_key)
    }

    pub fn config(&self) -> BootstrapConfig {
        BootstrapConfig::new(&self.identity_file, &self.defaults_file)
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        write(self.dir.path(), relative, content)
    }
}

/// A server leaf and its PKCS#8 key, both DER.
pub struct ServerCert {
    pub der: Vec<u8>,
    pub key_der: Vec<u8>,
}

impl ServerCert {
    pub fn issue(name: &str, issuer: &Certificate, issuer_key: &KeyPair) -> Self {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(vec![name.to_string()]).unwrap();
        params.distinguished_name.push(DnType::CommonName, name);
        params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
        let cert = params.signed_by(&key, issuer, issuer_key).unwrap();
        Self {
            der: cert.der().to_vec(),
            key_der: key.serialize_der(),
        }
    }

    /// A server certificate chaining to a freshly generated root.
    pub fn from_unknown_root(name: &str) -> Self {
        let (root, root_key) = root_ca("Unrelated Root CA");
        Self::issue(name, &root, &root_key)
    }
}

pub fn root_ca(common_name: &str) -> (Certificate, KeyPair) {
    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.distinguished_name.push(DnType::CommonName, common_name);
    let cert = params.self_signed(&key).unwrap();
    (cert, key)
}

fn write(base: &Path, relative: &str, content: &str) -> PathBuf {
    let path = base.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}
