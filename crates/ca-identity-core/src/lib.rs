//! Core types for bootstrapping a mutual-TLS client against a certificate authority.
//!
//! This crate provides the pieces that need no TLS stack:
//!
//! - **Records**: [`IdentityRecord`] and [`DefaultsRecord`], the two JSON files
//!   persisted on disk, with pure validation
//! - **Paths**: [`BootstrapConfig`], the explicit pair of file locations
//! - **Errors**: the [`IdentityError`] taxonomy shared by every crate
//!
//! # Example
//!
//! ```rust,ignore
//! use ca_identity_core::{DefaultsRecord, Result};
//!
//! fn check(path: &std::path::Path) -> Result<()> {
//!     let defaults = DefaultsRecord::load(path)?;
//!     defaults.validate()?;
//!     println!("CA: {}", defaults.ca_url);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/ca-identity-core/0.1.0")]

mod error;
mod paths;
pub mod records;

pub use error::{ErrorKind, IdentityError, Result};
pub use paths::{BootstrapConfig, DEFAULTS_FILE_NAME, IDENTITY_FILE_NAME, STEP_PATH_ENV};
pub use records::{DefaultsRecord, IdentityRecord};
