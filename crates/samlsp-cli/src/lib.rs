//! # samlsp-cli
//!
//! Command-line access to the samlsp request builder:
//! - Build a default AuthnRequest from configuration and print it as XML or JSON
//! - Check that a configuration names a usable service provider

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use error::{CliError, CliResult};
