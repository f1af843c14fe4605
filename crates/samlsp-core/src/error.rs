//! Error handling for samlsp configuration.
//!
//! Configuration errors are fatal: a mis-configured deployment has to be
//! fixed, retrying the same operation yields the same failure.

use thiserror::Error;

/// Result type alias using the samlsp core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns whether retrying the failed operation can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns whether this error points at the deployment's configuration.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("failed to parse config: {err}"))
    }
}
