use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bootstrap operations
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Errors that can occur while bootstrapping a CA client
#[derive(Error, Debug)]
pub enum IdentityError {
    /// A referenced file does not exist
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The missing file
        path: PathBuf,
    },

    /// A file exists but its content does not parse as the expected schema
    #[error("malformed {}: {reason}", path.display())]
    Malformed {
        /// The offending file (or the field that failed to parse)
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A record field holds a value that does not parse
    #[error("malformed {field}: {reason}")]
    MalformedField {
        /// Persisted name of the field
        field: &'static str,
        /// Parser message
        reason: String,
    },

    /// Parsed successfully but a required field is missing
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Certificate/key material is unparseable or the two halves do not match
    #[error("invalid certificate/key pair: {0}")]
    InvalidKeyPair(String),

    /// Any other I/O failure while reading a file
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The HTTP transport could not be assembled
    #[error("failed to build HTTP transport: {0}")]
    Transport(String),
}

/// Coarse classification of an [`IdentityError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`IdentityError::NotFound`]
    NotFound,
    /// See [`IdentityError::Malformed`]
    Malformed,
    /// See [`IdentityError::InvalidConfig`]
    InvalidConfig,
    /// See [`IdentityError::InvalidKeyPair`]
    InvalidKeyPair,
    /// See [`IdentityError::Io`]
    Io,
    /// See [`IdentityError::Transport`]
    Transport,
}

impl IdentityError {
    /// Map an I/O error on `path` to `NotFound` or `Io`
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Build a `Malformed` error for `path`
    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a `MalformedField` error for `field`
    pub fn malformed_field(field: &'static str, reason: impl ToString) -> Self {
        Self::MalformedField {
            field,
            reason: reason.to_string(),
        }
    }

    /// Returns the classification of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Malformed { .. } | Self::MalformedField { .. } => ErrorKind::Malformed,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Self::InvalidKeyPair(_) => ErrorKind::InvalidKeyPair,
            Self::Io { .. } => ErrorKind::Io,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Returns true if a referenced file was absent
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the file this error refers to, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path } | Self::Malformed { path, .. } | Self::Io { path, .. } => {
                Some(path.as_path())
            }
            _ => None,
        }
    }
}
