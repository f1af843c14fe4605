//! Command implementations.

mod check;
mod request;

use std::path::Path;

use samlsp_core::Saml2Config;

pub use check::run_check;
pub use request::{render_request, run_request};

/// Loads configuration from `path`, or from `$SAMLSP_CONFIG` when absent.
pub fn load_config(path: Option<&Path>) -> crate::CliResult<Saml2Config> {
    let config = match path {
        Some(path) => Saml2Config::load(path)?,
        None => Saml2Config::from_env()?,
    };
    Ok(config)
}
