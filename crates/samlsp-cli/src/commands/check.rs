//! Configuration check command.

use samlsp_core::{BindingType, Saml2Config};

use crate::output::success;

/// Verifies the configuration names a usable service provider.
pub fn run_check(config: &Saml2Config) -> crate::CliResult<()> {
    let sp = config.service_provider()?;

    success(&format!("service provider {} is configured", sp.id));
    if sp.endpoints.sign_on.binding == BindingType::NotSet {
        tracing::info!("no sign-on binding configured; requests will not name an ACS URL");
    }
    Ok(())
}
