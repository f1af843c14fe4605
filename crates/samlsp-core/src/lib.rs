//! # samlsp-core
//!
//! Configuration and error handling shared by the samlsp crates.
//!
//! The configuration model describes the local SAML 2.0 service provider:
//! its entity ID, the server it is reachable on, the sign-on endpoint the
//! identity provider should answer to, and the name identifier formats and
//! authentication contexts it asks for.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{
    AuthnContextComparisonMode, AuthnContextEntry, AuthnContexts, BindingType, NameIdFormatEntry,
    NameIdFormats, Saml2Config, ServiceProviderConfig, SignOnEndpoint, SpEndpoints,
};
pub use error::{Error, Result};
