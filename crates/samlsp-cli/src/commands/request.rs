//! Request command.

use samlsp_core::Saml2Config;
use samlsp_protocol::build_default_request;

use crate::cli::{OutputFormat, RequestArgs};

/// Builds the default request, applies overrides and prints it.
pub fn run_request(args: &RequestArgs, config: &Saml2Config) -> crate::CliResult<()> {
    let rendered = render_request(args, config)?;
    println!("{rendered}");
    Ok(())
}

/// Builds the default request, applies overrides and renders it.
pub fn render_request(args: &RequestArgs, config: &Saml2Config) -> crate::CliResult<String> {
    let mut request = build_default_request(config)?;

    if let Some(destination) = &args.destination {
        request.destination = Some(destination.clone());
    }
    if args.force_authn.is_some() {
        request.force_authn = args.force_authn;
    }
    if args.passive.is_some() {
        request.is_passive = args.passive;
    }

    tracing::debug!(request_id = %request.id(), format = ?args.output, "rendering AuthnRequest");

    match args.output {
        OutputFormat::Xml => Ok(request.to_xml()?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&request)?),
    }
}
