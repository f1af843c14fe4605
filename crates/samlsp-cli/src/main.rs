//! # samlsp
//!
//! Builds SAML 2.0 AuthnRequests from service provider configuration.

#![forbid(unsafe_code)]

use clap::Parser;
use samlsp_cli::{
    cli::{Cli, Command},
    commands::{load_config, run_check, run_request},
    output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        Command::Request(args) => run_request(args, &config),
        Command::Check => run_check(&config),
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
