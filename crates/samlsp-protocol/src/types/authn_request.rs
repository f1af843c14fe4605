//! SAML AuthnRequest types.
//!
//! Authentication request message sent by a service provider to an identity
//! provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SamlError, SamlResult};

use super::{AuthnContextClass, Conditions, NameId, NameIdPolicy, SamlBinding, SAML_VERSION};

/// Prefix for generated request identifiers.
///
/// XML `ID` values must not start with a digit.
const REQUEST_ID_PREFIX: &str = "id";

/// Generates a fresh request identifier.
///
/// The identifier is `"id"` followed by the 32 hex digits of a random
/// (version 4) UUID drawn from the operating system's CSPRNG, so concurrent
/// builders never share a value.
#[must_use]
pub fn generate_request_id() -> String {
    format!("{REQUEST_ID_PREFIX}{}", uuid::Uuid::new_v4().simple())
}

/// SAML Authentication Request.
///
/// A freshly constructed request is already protocol-valid apart from its
/// issuer value: it has a unique ID, version 2.0, an issue instant of now
/// and an empty `<saml:Issuer>`. Optional attributes left as `None` are not
/// rendered at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnRequest {
    id: String,

    /// Version of the SAML protocol (always "2.0").
    pub version: String,

    issue_instant: DateTime<Utc>,

    /// The issuer, normally the service provider's entity ID.
    pub issuer: NameId,

    /// The identity provider endpoint this request is sent to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// Consent obtained from the principal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<String>,

    /// Whether the identity provider must authenticate the principal directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_authn: Option<bool>,

    /// Whether the identity provider must not interact with the principal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_passive: Option<bool>,

    /// Binding the response should be delivered with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_binding: Option<String>,

    /// Index into the SP's assertion consumer service list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_consumer_service_index: Option<u16>,

    /// The URL the response should be delivered to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_consumer_service_url: Option<String>,

    /// Index into the SP's attribute consuming service list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_consuming_service_index: Option<u16>,

    /// A human-readable name of the requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,

    /// Name ID policy constraints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_id_policy: Option<NameIdPolicy>,

    /// Conditions on the requested assertion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,

    /// Requested authentication context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_authn_context: Option<RequestedAuthnContext>,
}

impl Default for AuthnRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthnRequest {
    /// Creates a minimal authentication request with an empty issuer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: generate_request_id(),
            version: SAML_VERSION.to_string(),
            issue_instant: Utc::now(),
            issuer: NameId::default(),
            destination: None,
            consent: None,
            force_authn: None,
            is_passive: None,
            protocol_binding: None,
            assertion_consumer_service_index: None,
            assertion_consumer_service_url: None,
            attribute_consuming_service_index: None,
            provider_name: None,
            name_id_policy: None,
            conditions: None,
            requested_authn_context: None,
        }
    }

    /// Creates a request with a caller-chosen ID.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::new()
        }
    }

    /// Returns the request ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the instant the request was created.
    #[must_use]
    pub const fn issue_instant(&self) -> DateTime<Utc> {
        self.issue_instant
    }

    /// Returns the issuer value.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer.value
    }

    /// Sets the issuer value, keeping the issuer's format.
    pub fn set_issuer(&mut self, value: impl Into<String>) {
        self.issuer.value = value.into();
    }

    /// Returns the issuer format.
    #[must_use]
    pub fn issuer_format(&self) -> Option<&str> {
        self.issuer.format.as_deref()
    }

    /// Sets the issuer format.
    pub fn set_issuer_format(&mut self, format: Option<String>) {
        self.issuer.format = format;
    }

    /// Replaces the name ID policy.
    pub fn set_name_id_policy(&mut self, policy: Option<NameIdPolicy>) {
        self.name_id_policy = policy;
    }

    /// Replaces the requested authentication context.
    pub fn set_requested_authn_context(&mut self, context: Option<RequestedAuthnContext>) {
        self.requested_authn_context = context;
    }

    /// Replaces the conditions.
    pub fn set_conditions(&mut self, conditions: Option<Conditions>) {
        self.conditions = conditions;
    }

    /// Sets the issuer value.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.set_issuer(issuer);
        self
    }

    /// Sets the assertion consumer service URL.
    #[must_use]
    pub fn with_acs_url(mut self, url: impl Into<String>) -> Self {
        self.assertion_consumer_service_url = Some(url.into());
        self
    }

    /// Sets the destination URL.
    #[must_use]
    pub fn with_destination(mut self, url: impl Into<String>) -> Self {
        self.destination = Some(url.into());
        self
    }

    /// Sets the protocol binding for the response.
    #[must_use]
    pub fn with_binding(mut self, binding: SamlBinding) -> Self {
        self.protocol_binding = Some(binding.uri().to_string());
        self
    }

    /// Sets the name ID policy.
    #[must_use]
    pub fn with_name_id_policy(mut self, policy: NameIdPolicy) -> Self {
        self.name_id_policy = Some(policy);
        self
    }

    /// Sets the requested authentication context.
    #[must_use]
    pub fn with_authn_context(mut self, context: RequestedAuthnContext) -> Self {
        self.requested_authn_context = Some(context);
        self
    }

    /// Sets the conditions.
    #[must_use]
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Sets `ForceAuthn`.
    #[must_use]
    pub const fn force_authn(mut self, force: bool) -> Self {
        self.force_authn = Some(force);
        self
    }

    /// Sets `IsPassive`.
    #[must_use]
    pub const fn is_passive(mut self, passive: bool) -> Self {
        self.is_passive = Some(passive);
        self
    }

    /// Sets the provider name.
    #[must_use]
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Returns the parsed protocol binding.
    #[must_use]
    pub fn parsed_binding(&self) -> Option<SamlBinding> {
        self.protocol_binding.as_deref().and_then(SamlBinding::from_uri)
    }

    /// Validates the basic structure of this request.
    pub fn validate(&self) -> SamlResult<()> {
        match self.id.chars().next() {
            None => return Err(SamlError::InvalidRequest("ID is required".to_string())),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Err(SamlError::InvalidRequest(format!(
                    "ID must start with a letter or underscore: {}",
                    self.id
                )));
            }
            Some(_) => {}
        }
        if self.version != SAML_VERSION {
            return Err(SamlError::InvalidRequest(format!(
                "unsupported SAML version: {}",
                self.version
            )));
        }
        if self.issuer.is_empty() {
            return Err(SamlError::MissingElement("Issuer".to_string()));
        }
        Ok(())
    }
}

/// Requested authentication context.
///
/// References are kept as one ordered sequence of (kind, value) pairs, so the
/// element names and values can never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedAuthnContext {
    /// Comparison method; `None` renders no `Comparison` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<AuthnContextComparison>,

    /// Context references in request order.
    #[serde(default)]
    pub references: Vec<AuthnContextRef>,
}

impl RequestedAuthnContext {
    /// Creates an empty requested authentication context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            comparison: None,
            references: Vec::new(),
        }
    }

    /// Creates a context requiring exact match of a class reference.
    #[must_use]
    pub fn exact(class: AuthnContextClass) -> Self {
        Self::new()
            .with_comparison(AuthnContextComparison::Exact)
            .with_class_ref(class)
    }

    /// Appends a well-known class reference.
    #[must_use]
    pub fn with_class_ref(mut self, class: AuthnContextClass) -> Self {
        self.push(AuthnContextRefKind::ClassRef, class.uri());
        self
    }

    /// Sets the comparison method.
    #[must_use]
    pub const fn with_comparison(mut self, comparison: AuthnContextComparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    /// Appends a reference.
    pub fn push(&mut self, kind: AuthnContextRefKind, value: impl Into<String>) {
        self.references.push(AuthnContextRef {
            kind,
            value: value.into(),
        });
    }

    /// Reference values, in order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &str> {
        self.references.iter().map(|r| r.value.as_str())
    }

    /// Reference element kinds, positionally aligned with [`Self::values`].
    pub fn kinds(&self) -> impl ExactSizeIterator<Item = AuthnContextRefKind> + '_ {
        self.references.iter().map(|r| r.kind)
    }

    /// Returns the number of references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Returns whether there are no references.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// A single authentication context reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnContextRef {
    /// Element the value is rendered as.
    pub kind: AuthnContextRefKind,
    /// Context class or declaration URI.
    pub value: String,
}

/// Element kind of an authentication context reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthnContextRefKind {
    /// `<saml:AuthnContextClassRef>`.
    #[default]
    ClassRef,
    /// `<saml:AuthnContextDeclRef>`.
    DeclRef,
}

impl AuthnContextRefKind {
    /// Returns the element's local name.
    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        match self {
            Self::ClassRef => "AuthnContextClassRef",
            Self::DeclRef => "AuthnContextDeclRef",
        }
    }

    /// Maps a configured reference type to a kind.
    ///
    /// Only the exact name `AuthnContextDeclRef` selects a declaration
    /// reference; anything else, including no value, is a class reference.
    #[must_use]
    pub fn from_reference_type(reference_type: Option<&str>) -> Self {
        match reference_type {
            Some("AuthnContextDeclRef") => Self::DeclRef,
            _ => Self::ClassRef,
        }
    }
}

/// Authentication context comparison methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthnContextComparison {
    /// Exact match required.
    Exact,
    /// Match must be at least as strong.
    Minimum,
    /// Match must be at most as strong.
    Maximum,
    /// Match must be stronger than any listed context.
    Better,
}

impl AuthnContextComparison {
    /// Returns the attribute value for this comparison.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Better => "better",
        }
    }

    /// Parses an attribute value.
    #[must_use]
    pub fn from_str_value(value: &str) -> Option<Self> {
        match value {
            "exact" => Some(Self::Exact),
            "minimum" => Some(Self::Minimum),
            "maximum" => Some(Self::Maximum),
            "better" => Some(Self::Better),
            _ => None,
        }
    }
}
