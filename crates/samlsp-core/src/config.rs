//! Service provider configuration.
//!
//! Configuration is read from a TOML file, either at an explicit path or at
//! the path named by the `SAMLSP_CONFIG` environment variable:
//!
//! ```toml
//! [service_provider]
//! id = "https://sp.example/"
//! server = "https://sp.example/"
//!
//! [service_provider.endpoints.sign_on]
//! binding = "post"
//! local_path = "/acs"
//!
//! [service_provider.name_id_formats]
//! allow_create = true
//! formats = [{ format = "urn:oasis:names:tc:SAML:2.0:nameid-format:transient" }]
//!
//! [service_provider.authentication_contexts]
//! comparison = "minimum"
//! contexts = [{ context = "urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport" }]
//! ```
//!
//! Loading only checks the TOML shape. Whether a usable service provider
//! identity is present is decided by [`Saml2Config::service_provider`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "SAMLSP_CONFIG";

/// Top-level SAML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Saml2Config {
    /// The local service provider, if one is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<ServiceProviderConfig>,
}

impl Saml2Config {
    /// Creates a configuration for the given service provider.
    #[must_use]
    pub fn new(service_provider: ServiceProviderConfig) -> Self {
        Self {
            service_provider: Some(service_provider),
        }
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading SAML configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads configuration from the file named by `SAMLSP_CONFIG`.
    ///
    /// A `.env` file in the working directory is honoured if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let path = std::env::var(CONFIG_PATH_ENV).map(PathBuf::from).map_err(|_| {
            Error::Config(format!("{CONFIG_PATH_ENV} environment variable is required"))
        })?;

        Self::load(path)
    }

    /// Returns the configured service provider.
    ///
    /// Fails when no service provider is configured or its entity ID is empty.
    /// An ID made only of whitespace counts as empty. Surrounding whitespace
    /// on a non-blank ID is kept and appears verbatim in built requests.
    pub fn service_provider(&self) -> Result<&ServiceProviderConfig> {
        match &self.service_provider {
            Some(sp) if !sp.id.trim().is_empty() => Ok(sp),
            _ => Err(Error::Config("service provider not set".to_string())),
        }
    }
}

/// Configuration of the local service provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProviderConfig {
    /// Entity ID of the service provider.
    #[serde(default)]
    pub id: String,

    /// Base URL the service provider is reachable on.
    #[serde(default)]
    pub server: String,

    /// Local endpoints.
    #[serde(default)]
    pub endpoints: SpEndpoints,

    /// Requested name identifier formats, in order of preference.
    #[serde(default)]
    pub name_id_formats: NameIdFormats,

    /// Requested authentication contexts.
    #[serde(default)]
    pub authentication_contexts: AuthnContexts,
}

impl ServiceProviderConfig {
    /// Creates a service provider configuration with no endpoints or policies.
    #[must_use]
    pub fn new(id: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            server: server.into(),
            ..Self::default()
        }
    }

    /// Sets the sign-on endpoint.
    #[must_use]
    pub fn with_sign_on(mut self, binding: BindingType, local_path: impl Into<String>) -> Self {
        self.endpoints.sign_on = SignOnEndpoint {
            binding,
            local_path: local_path.into(),
        };
        self
    }

    /// Appends a requested name identifier format.
    #[must_use]
    pub fn with_name_id_format(mut self, format: impl Into<String>) -> Self {
        self.name_id_formats.formats.push(NameIdFormatEntry {
            format: format.into(),
        });
        self
    }

    /// Sets whether the identity provider may create new identifiers.
    #[must_use]
    pub const fn allow_create(mut self, allow: bool) -> Self {
        self.name_id_formats.allow_create = allow;
        self
    }

    /// Appends a requested authentication context.
    #[must_use]
    pub fn with_authn_context(
        mut self,
        context: impl Into<String>,
        reference_type: Option<&str>,
    ) -> Self {
        self.authentication_contexts.contexts.push(AuthnContextEntry {
            context: context.into(),
            reference_type: reference_type.map(str::to_string),
        });
        self
    }

    /// Sets the authentication context comparison mode.
    #[must_use]
    pub const fn with_comparison(mut self, comparison: AuthnContextComparisonMode) -> Self {
        self.authentication_contexts.comparison = comparison;
        self
    }
}

/// Local endpoints of the service provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpEndpoints {
    /// Endpoint receiving authentication responses.
    #[serde(default)]
    pub sign_on: SignOnEndpoint,
}

/// The sign-on (assertion consumer) endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOnEndpoint {
    /// Binding the service provider expects the response on.
    #[serde(default)]
    pub binding: BindingType,

    /// Path relative to the service provider's server URL.
    #[serde(default)]
    pub local_path: String,
}

/// Binding kinds an endpoint can be configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    /// No binding configured.
    #[default]
    NotSet,
    /// HTTP-Artifact binding.
    Artifact,
    /// HTTP-POST binding.
    Post,
    /// HTTP-Redirect binding.
    Redirect,
    /// SOAP binding.
    Soap,
}

/// Requested name identifier formats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameIdFormats {
    /// Whether the identity provider may mint a new identifier.
    #[serde(default)]
    pub allow_create: bool,

    /// Formats in order of preference.
    #[serde(default)]
    pub formats: Vec<NameIdFormatEntry>,
}

impl NameIdFormats {
    /// Returns the most preferred format.
    #[must_use]
    pub fn first(&self) -> Option<&NameIdFormatEntry> {
        self.formats.first()
    }
}

/// A single requested name identifier format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameIdFormatEntry {
    /// Format URI.
    pub format: String,
}

/// Requested authentication contexts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnContexts {
    /// How the identity provider compares its context to the requested ones.
    #[serde(default)]
    pub comparison: AuthnContextComparisonMode,

    /// Context references in configuration order.
    #[serde(default)]
    pub contexts: Vec<AuthnContextEntry>,
}

/// A single requested authentication context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnContextEntry {
    /// Context class or declaration URI.
    pub context: String,

    /// Reference element name, `AuthnContextDeclRef` or `AuthnContextClassRef`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<String>,
}

/// Configured authentication context comparison mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthnContextComparisonMode {
    /// No comparison requested.
    #[default]
    Unspecified,
    /// Exact match required.
    Exact,
    /// At least as strong as one of the references.
    Minimum,
    /// At most as strong as one of the references.
    Maximum,
    /// Stronger than any of the references.
    Better,
}
