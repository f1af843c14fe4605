//! Default request integration tests.
//!
//! Configuration file to rendered document, and back.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use samlsp_core::{BindingType, Saml2Config, ServiceProviderConfig};
use samlsp_protocol::{
    build_default_request, parse_authn_request, AuthnContextComparison, AuthnContextRefKind,
    AuthnRequest, SamlBinding,
};

use crate::common::{init_tracing, load_config, FULL_CONFIG, SP_ID, TRANSIENT};

/// Builds the documented example and checks every populated field.
#[test]
fn test_example_configuration() -> anyhow::Result<()> {
    init_tracing();
    let config = Saml2Config::new(
        ServiceProviderConfig::new(SP_ID, SP_ID)
            .with_sign_on(BindingType::Post, "/acs")
            .with_name_id_format(TRANSIENT),
    );

    let request = build_default_request(&config)?;

    assert_eq!(request.issuer(), SP_ID);
    assert_eq!(
        request.assertion_consumer_service_url.as_deref(),
        Some("https://sp.example/acs")
    );
    assert_eq!(request.parsed_binding(), Some(SamlBinding::HttpPost));
    let policy = request.name_id_policy.as_ref().expect("name id policy");
    assert_eq!(policy.format.as_deref(), Some(TRANSIENT));
    assert_eq!(policy.sp_name_qualifier.as_deref(), Some(SP_ID));
    assert!(request.requested_authn_context.is_none());

    Ok(())
}

/// Loads a configuration file and reads the rendered request back.
#[test]
fn test_config_file_round_trip() -> anyhow::Result<()> {
    init_tracing();
    let config = load_config(FULL_CONFIG)?;

    let request = AuthnRequest::default_for(&config)?;
    let xml = request.to_xml()?;
    let parsed = parse_authn_request(&xml)?;

    assert_eq!(parsed.id, request.id());
    assert_eq!(parsed.issuer, request.issuer());
    assert_eq!(
        parsed.assertion_consumer_service_url,
        request.assertion_consumer_service_url
    );
    assert_eq!(parsed.protocol_binding.as_deref(), Some(SamlBinding::HttpPost.uri()));
    assert_eq!(parsed.name_id_policy_format.as_deref(), Some(TRANSIENT));
    assert_eq!(parsed.audiences, vec![SP_ID.to_string()]);
    assert_eq!(parsed.comparison, Some(AuthnContextComparison::Exact));
    assert_eq!(
        parsed
            .authn_context_refs
            .iter()
            .map(|r| r.kind)
            .collect::<Vec<_>>(),
        vec![AuthnContextRefKind::ClassRef, AuthnContextRefKind::DeclRef]
    );
    assert_eq!(parsed.force_authn, None);
    assert_eq!(parsed.is_passive, None);

    Ok(())
}

/// A configuration file without a service provider cannot produce a request.
#[test]
fn test_missing_service_provider() -> anyhow::Result<()> {
    let config = load_config("# nothing configured\n")?;

    let err = build_default_request(&config).expect_err("request without service provider");
    assert!(err.is_config_error(), "unexpected error: {err}");

    Ok(())
}

/// The same document is rendered for the same model.
#[test]
fn test_rendering_is_stable() -> anyhow::Result<()> {
    let request = AuthnRequest::default_for(&load_config(FULL_CONFIG)?)?;

    let first = request.to_xml()?;
    let second = request.clone().to_xml()?;
    assert_eq!(first, second);
    assert!(!first.contains('\n'), "rendering must not add whitespace");

    Ok(())
}

/// Requests built concurrently from one configuration never share an ID.
#[test]
fn test_concurrent_builds_have_distinct_ids() -> anyhow::Result<()> {
    let config = load_config(FULL_CONFIG)?;

    let ids: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    (0..250)
                        .map(|_| {
                            build_default_request(&config)
                                .map(|r| r.id().to_string())
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("builder thread panicked"))
            .collect::<Result<Vec<_>, _>>()
            .map(|chunks| chunks.into_iter().flatten().collect::<Vec<String>>())
    })?;

    let unique: HashSet<&str> = ids.iter().map(String::as_str).collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.iter().all(|id| id.starts_with("id")));

    Ok(())
}

/// Entity IDs are carried verbatim, surrounding whitespace included.
#[test]
fn test_padded_entity_id_round_trip() -> anyhow::Result<()> {
    let config = Saml2Config::new(
        ServiceProviderConfig::new(" https://sp.example/ ", SP_ID)
            .with_sign_on(BindingType::Post, "/acs")
            .with_authn_context("urn:ctx\n", None),
    );

    let request = build_default_request(&config)?;
    let parsed = parse_authn_request(&request.to_xml()?)?;

    assert_eq!(parsed.issuer, " https://sp.example/ ");
    assert_eq!(parsed.audiences, vec![" https://sp.example/ ".to_string()]);
    assert_eq!(parsed.authn_context_refs[0].value, "urn:ctx\n");

    Ok(())
}

/// Caller changes after building are reflected in the document.
#[test]
fn test_caller_overrides() -> anyhow::Result<()> {
    let mut request = AuthnRequest::default_for(&load_config(FULL_CONFIG)?)?
        .with_destination("https://idp.example/sso")
        .force_authn(true);
    request.set_name_id_policy(None);

    let parsed = parse_authn_request(&request.to_xml()?)?;
    assert_eq!(parsed.destination.as_deref(), Some("https://idp.example/sso"));
    assert_eq!(parsed.force_authn, Some(true));
    assert_eq!(parsed.name_id_policy_format, None);

    Ok(())
}
