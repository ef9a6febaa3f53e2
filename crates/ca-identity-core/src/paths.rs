//! Locations of the identity and defaults files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{IdentityError, Result};

/// Environment variable naming the base configuration directory.
pub const STEP_PATH_ENV: &str = "STEPPATH";

/// File name of the identity record under `<base>/config`.
pub const IDENTITY_FILE_NAME: &str = "identity.json";

/// File name of the defaults record under `<base>/config`.
pub const DEFAULTS_FILE_NAME: &str = "defaults.json";

/// Directory under `$HOME` used when `STEPPATH` is unset.
const HOME_DIR_NAME: &str = ".step";

/// Where bootstrap reads its two records from.
///
/// Passed explicitly into bootstrap so that concurrent calls with different
/// paths never interfere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Path to the identity record
    pub identity_file: PathBuf,

    /// Path to the defaults record
    pub defaults_file: PathBuf,
}

impl BootstrapConfig {
    /// Use the given file paths as-is.
    pub fn new(identity_file: impl Into<PathBuf>, defaults_file: impl Into<PathBuf>) -> Self {
        Self {
            identity_file: identity_file.into(),
            defaults_file: defaults_file.into(),
        }
    }

    /// Use `<base>/config/identity.json` and `<base>/config/defaults.json`.
    pub fn from_step_path(base: impl AsRef<Path>) -> Self {
        let config_dir = base.as_ref().join("config");
        Self {
            identity_file: config_dir.join(IDENTITY_FILE_NAME),
            defaults_file: config_dir.join(DEFAULTS_FILE_NAME),
        }
    }

    /// Resolve the base directory from `$STEPPATH`, falling back to `$HOME/.step`.
    pub fn from_env() -> Result<Self> {
        let base = resolve_base_dir(std::env::var_os(STEP_PATH_ENV), dirs::home_dir())?;
        debug!(base = %base.display(), "resolved configuration directory");
        Ok(Self::from_step_path(base))
    }

    /// Replace the identity file path.
    #[must_use]
    pub fn identity_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_file = path.into();
        self
    }

    /// Replace the defaults file path.
    #[must_use]
    pub fn defaults_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults_file = path.into();
        self
    }
}

fn resolve_base_dir(step_path: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    match step_path {
        Some(p) if !p.is_empty() => Ok(PathBuf::from(p)),
        _ => home.map(|h| h.join(HOME_DIR_NAME)).ok_or_else(|| {
            IdentityError::InvalidConfig(format!(
                "cannot determine configuration directory: set {STEP_PATH_ENV}"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_step_path_layout() {
        let config = BootstrapConfig::from_step_path("/srv/pki");
        assert_eq!(config.identity_file, PathBuf::from("/srv/pki/config/identity.json"));
        assert_eq!(config.defaults_file, PathBuf::from("/srv/pki/config/defaults.json"));
    }

    #[test]
    fn test_overrides() {
        let config = BootstrapConfig::from_step_path("/srv/pki").identity_file("/tmp/id.json");
        assert_eq!(config.identity_file, PathBuf::from("/tmp/id.json"));
        assert_eq!(config.defaults_file, PathBuf::from("/srv/pki/config/defaults.json"));
    }

    #[test]
    fn test_base_dir_prefers_step_path() {
        let base = resolve_base_dir(Some("/opt/step".into()), Some("/home/u".into())).unwrap();
        assert_eq!(base, PathBuf::from("/opt/step"));
    }

    #[test]
    fn test_base_dir_falls_back_to_home() {
        let base = resolve_base_dir(None, Some("/home/u".into())).unwrap();
        assert_eq!(base, PathBuf::from("/home/u/.step"));

        let base = resolve_base_dir(Some(OsString::new()), Some("/home/u".into())).unwrap();
        assert_eq!(base, PathBuf::from("/home/u/.step"));
    }

    #[test]
    fn test_base_dir_unresolvable() {
        let err = resolve_base_dir(None, None).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidConfig);
    }
}
