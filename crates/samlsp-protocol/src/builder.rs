//! Default request construction.
//!
//! Maps service provider configuration onto a populated [`AuthnRequest`].
//! The mapping is pure: it reads the configuration, performs no I/O and
//! leaves nothing behind but the returned request. For a fixed
//! configuration only the request ID and issue instant differ between calls.

use samlsp_core::{
    AuthnContextComparisonMode, BindingType, Saml2Config, ServiceProviderConfig, SignOnEndpoint,
};
use url::Url;

use crate::error::SamlResult;
use crate::types::{
    AuthnContextComparison, AuthnContextRefKind, AuthnRequest, Conditions, NameIdPolicy,
    RequestedAuthnContext, SamlBinding,
};

/// Builds an authentication request with defaults derived from `config`.
///
/// # Errors
///
/// Returns a configuration error when no service provider is configured or
/// its entity ID is empty, and a URL resolution error when the sign-on
/// endpoint cannot be resolved against the server URL.
pub fn build_default_request(config: &Saml2Config) -> SamlResult<AuthnRequest> {
    let sp = config.service_provider().inspect_err(|e| {
        tracing::warn!(error = %e, "cannot build AuthnRequest");
    })?;

    let mut request = AuthnRequest::new().with_issuer(&sp.id);

    let sign_on = &sp.endpoints.sign_on;
    if sign_on.binding != BindingType::NotSet {
        request.assertion_consumer_service_url = Some(resolve_acs_url(&sp.server, sign_on)?);
    }
    if let Some(binding) = SamlBinding::from_binding_type(sign_on.binding) {
        request = request.with_binding(binding);
    }

    request.set_name_id_policy(name_id_policy(sp));
    request.set_requested_authn_context(requested_authn_context(sp));
    request.set_conditions(Some(Conditions::for_audience(&sp.id)));

    tracing::debug!(
        request_id = %request.id(),
        issuer = %sp.id,
        binding = ?sign_on.binding,
        name_id_format = ?request.name_id_policy.as_ref().and_then(|p| p.format.as_deref()),
        authn_contexts = sp.authentication_contexts.contexts.len(),
        "built default AuthnRequest"
    );

    Ok(request)
}

impl AuthnRequest {
    /// Builds a request with defaults derived from `config`.
    ///
    /// See [`build_default_request`].
    pub fn default_for(config: &Saml2Config) -> SamlResult<Self> {
        build_default_request(config)
    }
}

/// Resolves the sign-on endpoint's local path against the server URL.
fn resolve_acs_url(server: &str, sign_on: &SignOnEndpoint) -> SamlResult<String> {
    let base = Url::parse(server)?;
    Ok(base.join(&sign_on.local_path)?.to_string())
}

/// Requests the first configured format; later entries are ignored.
fn name_id_policy(sp: &ServiceProviderConfig) -> Option<NameIdPolicy> {
    let formats = &sp.name_id_formats;
    formats.first().map(|entry| {
        NameIdPolicy::for_service_provider(&entry.format, &sp.id, formats.allow_create)
    })
}

fn requested_authn_context(sp: &ServiceProviderConfig) -> Option<RequestedAuthnContext> {
    let contexts = &sp.authentication_contexts;
    if contexts.contexts.is_empty() {
        return None;
    }

    let mut requested = RequestedAuthnContext {
        comparison: comparison(contexts.comparison),
        references: Vec::with_capacity(contexts.contexts.len()),
    };
    for entry in &contexts.contexts {
        requested.push(
            AuthnContextRefKind::from_reference_type(entry.reference_type.as_deref()),
            &entry.context,
        );
    }
    Some(requested)
}

const fn comparison(mode: AuthnContextComparisonMode) -> Option<AuthnContextComparison> {
    match mode {
        AuthnContextComparisonMode::Better => Some(AuthnContextComparison::Better),
        AuthnContextComparisonMode::Minimum => Some(AuthnContextComparison::Minimum),
        AuthnContextComparisonMode::Maximum => Some(AuthnContextComparison::Maximum),
        AuthnContextComparisonMode::Exact => Some(AuthnContextComparison::Exact),
        AuthnContextComparisonMode::Unspecified => None,
    }
}
