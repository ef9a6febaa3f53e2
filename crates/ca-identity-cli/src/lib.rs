//! # ca-identity-cli
//!
//! Command-line front end for the CA client bootstrap.
//!
//! ## Features
//!
//! - **Inspect**: show the CA URL, client identity and trust anchors
//! - **Resolve**: print the absolute URL a reference resolves to
//! - **Init**: write the identity and defaults records
//! - **Get**: issue one request over mutual TLS
//! - **Multiple output formats**: pretty or JSON

pub mod cli;
pub mod output;

pub use cli::run;
