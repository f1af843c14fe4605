//! SAML 2.0 authentication requests for service providers.
//!
//! This crate builds the `<samlp:AuthnRequest>` a service provider sends to an
//! identity provider to start federated sign-on:
//!
//! - **AuthnRequest model** - Protocol-valid in-memory request with optional
//!   attributes that stay absent unless set
//! - **Default request builder** - Populates a request from
//!   [`samlsp_core::Saml2Config`]
//! - **XML rendering** - Deterministic output for binding and signing steps
//!
//! # Architecture
//!
//! - [`types`] - Request types, sub-elements and protocol constants
//! - [`builder`] - Configuration to request mapping
//! - [`xml`] - Rendering and read-back
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```rust
//! use samlsp_core::{BindingType, Saml2Config, ServiceProviderConfig};
//! use samlsp_protocol::{build_default_request, parse_authn_request};
//!
//! let config = Saml2Config::new(
//!     ServiceProviderConfig::new("https://sp.example/", "https://sp.example/")
//!         .with_sign_on(BindingType::Post, "/acs"),
//! );
//!
//! let request = build_default_request(&config)?;
//! let xml = request.to_xml()?;
//!
//! let parsed = parse_authn_request(&xml)?;
//! assert_eq!(parsed.id, request.id());
//! assert_eq!(parsed.assertion_consumer_service_url.as_deref(), Some("https://sp.example/acs"));
//! # Ok::<(), samlsp_protocol::SamlError>(())
//! ```
//!
//! # SAML Specifications
//!
//! - [SAML 2.0 Core](https://docs.oasis-open.org/security/saml/v2.0/saml-core-2.0-os.pdf)
//! - [SAML 2.0 Bindings](https://docs.oasis-open.org/security/saml/v2.0/saml-bindings-2.0-os.pdf)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod types;
pub mod xml;

pub use builder::build_default_request;
pub use error::{SamlError, SamlResult};
pub use types::*;
pub use xml::{parse_authn_request, ParsedAuthnRequest};
