//! SAML error types.
//!
//! Building a request fails only on configuration problems. Rendering and
//! reading back XML have their own variants at the serialization boundary.

use thiserror::Error;

/// Result type for SAML operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// SAML protocol errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// Service provider configuration is missing or unusable.
    #[error(transparent)]
    Config(#[from] samlsp_core::Error),

    /// A configured URL could not be resolved.
    #[error("URL resolution failed: {0}")]
    UrlResolution(#[from] url::ParseError),

    /// XML rendering error.
    #[error("XML write error: {0}")]
    XmlWrite(String),

    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Request is structurally invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing required element or attribute.
    #[error("missing required element: {0}")]
    MissingElement(String),
}

impl SamlError {
    /// Returns whether this error is a configuration error.
    ///
    /// Configuration errors are fatal; the deployment must be fixed.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(samlsp_core::Error::Config(_)))
    }
}

impl From<quick_xml::Error> for SamlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for SamlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_classified() {
        let err = SamlError::from(samlsp_core::Error::Config("service provider not set".into()));
        assert!(err.is_config_error());
        assert_eq!(err.to_string(), "configuration error: service provider not set");
    }

    #[test]
    fn url_errors_are_not_config_errors() {
        let err = SamlError::from(url::Url::parse("not a url").unwrap_err());
        assert!(!err.is_config_error());
        assert!(err.to_string().starts_with("URL resolution failed"));
    }
}
