//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// samlsp - build SAML 2.0 authentication requests for a service provider.
#[derive(Debug, Parser)]
#[command(name = "samlsp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to $SAMLSP_CONFIG).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a default AuthnRequest and print it.
    Request(RequestArgs),

    /// Check that the configuration names a usable service provider.
    Check,
}

/// Arguments for `request`.
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Identity provider endpoint to address the request to.
    #[arg(long)]
    pub destination: Option<String>,

    /// Set the ForceAuthn attribute.
    #[arg(long)]
    pub force_authn: Option<bool>,

    /// Set the IsPassive attribute.
    #[arg(long)]
    pub passive: Option<bool>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "xml")]
    pub output: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The rendered XML document.
    #[default]
    Xml,
    /// The request model as JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn parses_request_overrides() {
        let cli = Cli::parse_from([
            "samlsp",
            "--config",
            "sp.toml",
            "request",
            "--destination",
            "https://idp.example/sso",
            "--force-authn",
            "false",
            "--output",
            "json",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("sp.toml")));
        let Command::Request(args) = cli.command else {
            panic!("expected request command");
        };
        assert_eq!(args.destination.as_deref(), Some("https://idp.example/sso"));
        assert_eq!(args.force_authn, Some(false));
        assert_eq!(args.passive, None);
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
