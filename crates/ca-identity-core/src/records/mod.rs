//! The two JSON records read at bootstrap.
//!
//! Both are read once, validated immediately, and never mutated afterwards.

mod defaults;
mod identity;

pub use defaults::DefaultsRecord;
pub use identity::IdentityRecord;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::error::{IdentityError, Result};

/// Read `path` and parse it as JSON.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read(path).map_err(|e| IdentityError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "read record");
    serde_json::from_slice(&content).map_err(|e| IdentityError::malformed(path, e))
}

/// Write `value` to `path` as pretty JSON, creating parent directories.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| IdentityError::io(parent, e))?;
        }
    }

    let mut content =
        serde_json::to_vec_pretty(value).map_err(|e| IdentityError::malformed(path, e))?;
    content.push(b'\n');
    std::fs::write(path, content).map_err(|e| IdentityError::io(path, e))
}
