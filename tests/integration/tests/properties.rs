//! Property tests over the service provider configuration space.

use proptest::prelude::*;
use samlsp_core::{AuthnContextComparisonMode, BindingType, Saml2Config, ServiceProviderConfig};
use samlsp_protocol::{
    build_default_request, parse_authn_request, AuthnContextRefKind, NameIdFormat, SamlBinding,
};

const DECL_REF: &str = "AuthnContextDeclRef";

fn binding() -> impl Strategy<Value = BindingType> {
    prop_oneof![
        Just(BindingType::NotSet),
        Just(BindingType::Artifact),
        Just(BindingType::Post),
        Just(BindingType::Redirect),
        Just(BindingType::Soap),
    ]
}

fn comparison() -> impl Strategy<Value = AuthnContextComparisonMode> {
    prop_oneof![
        Just(AuthnContextComparisonMode::Unspecified),
        Just(AuthnContextComparisonMode::Exact),
        Just(AuthnContextComparisonMode::Minimum),
        Just(AuthnContextComparisonMode::Maximum),
        Just(AuthnContextComparisonMode::Better),
    ]
}

fn name_id_format() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(NameIdFormat::Entity.uri().to_string()),
        Just(NameIdFormat::Transient.uri().to_string()),
        Just(NameIdFormat::Persistent.uri().to_string()),
        Just(NameIdFormat::Email.uri().to_string()),
        "urn:example:[a-z]{1,8}",
    ]
}

/// Text with optional surrounding whitespace and XML-special characters.
fn padded(core: &'static str) -> impl Strategy<Value = String> {
    (
        "[ \t\n]{0,2}",
        core,
        prop::option::of("[&<>\"']{1,3}"),
        "[ \t\n]{0,2}",
    )
        .prop_map(|(lead, core, special, trail)| {
            format!("{lead}{core}{}{trail}", special.unwrap_or_default())
        })
}

fn reference_type() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(DECL_REF.to_string())),
        Just(Some("AuthnContextClassRef".to_string())),
        "[A-Za-z]{0,12}".prop_map(Some),
    ]
}

prop_compose! {
    fn service_provider()(
        host in "[a-z]{1,10}",
        id in padded("https://[a-z]{1,10}\\.example/"),
        path in "/[a-z]{1,8}(/[a-z]{1,8})?",
        binding in binding(),
        formats in prop::collection::vec(name_id_format(), 0..4),
        allow_create in any::<bool>(),
        contexts in prop::collection::vec((padded("urn:ctx:[a-z]{1,8}"), reference_type()), 0..5),
        comparison in comparison(),
    ) -> ServiceProviderConfig {
        let server = format!("https://{host}.example/");
        let mut sp = ServiceProviderConfig::new(id, server)
            .with_sign_on(binding, path)
            .allow_create(allow_create)
            .with_comparison(comparison);
        for format in formats {
            sp = sp.with_name_id_format(format);
        }
        for (context, reference_type) in contexts {
            sp = sp.with_authn_context(context, reference_type.as_deref());
        }
        sp
    }
}

proptest! {
    #[test]
    fn issuer_and_audience_are_the_entity_id(sp in service_provider()) {
        let request = build_default_request(&Saml2Config::new(sp.clone())).unwrap();

        prop_assert_eq!(request.issuer(), sp.id.as_str());
        let conditions = request.conditions.unwrap();
        prop_assert_eq!(conditions.audience_restrictions.len(), 1);
        prop_assert_eq!(conditions.audiences().collect::<Vec<_>>(), vec![sp.id.as_str()]);
    }

    #[test]
    fn binding_and_acs_url_follow_sign_on_endpoint(sp in service_provider()) {
        let request = build_default_request(&Saml2Config::new(sp.clone())).unwrap();
        let sign_on = &sp.endpoints.sign_on;

        match SamlBinding::from_binding_type(sign_on.binding) {
            Some(binding) => {
                prop_assert_eq!(request.protocol_binding.as_deref(), Some(binding.uri()));
                let acs = request.assertion_consumer_service_url.unwrap();
                prop_assert_eq!(acs, format!("{}{}", sp.server, &sign_on.local_path[1..]));
            }
            None => {
                prop_assert!(request.protocol_binding.is_none());
                prop_assert!(request.assertion_consumer_service_url.is_none());
            }
        }
    }

    #[test]
    fn first_format_is_requested(sp in service_provider()) {
        let request = build_default_request(&Saml2Config::new(sp.clone())).unwrap();

        match sp.name_id_formats.first() {
            Some(first) => {
                let policy = request.name_id_policy.unwrap();
                prop_assert_eq!(policy.format.as_deref(), Some(first.format.as_str()));
                prop_assert_eq!(policy.allow_create, sp.name_id_formats.allow_create);
                if NameIdFormat::is_entity(&first.format) {
                    prop_assert!(policy.sp_name_qualifier.is_none());
                } else {
                    prop_assert_eq!(policy.sp_name_qualifier.as_deref(), Some(sp.id.as_str()));
                }
            }
            None => prop_assert!(request.name_id_policy.is_none()),
        }
    }

    #[test]
    fn authn_context_references_stay_aligned(sp in service_provider()) {
        let request = build_default_request(&Saml2Config::new(sp.clone())).unwrap();
        let configured = &sp.authentication_contexts.contexts;

        if configured.is_empty() {
            prop_assert!(request.requested_authn_context.is_none());
            return Ok(());
        }

        let context = request.requested_authn_context.unwrap();
        prop_assert_eq!(context.len(), configured.len());
        prop_assert_eq!(context.values().len(), context.kinds().len());
        for ((value, kind), entry) in context.values().zip(context.kinds()).zip(configured) {
            prop_assert_eq!(value, entry.context.as_str());
            let expected = if entry.reference_type.as_deref() == Some(DECL_REF) {
                AuthnContextRefKind::DeclRef
            } else {
                AuthnContextRefKind::ClassRef
            };
            prop_assert_eq!(kind, expected);
        }
        prop_assert_eq!(
            context.comparison.is_none(),
            sp.authentication_contexts.comparison == AuthnContextComparisonMode::Unspecified
        );
    }

    #[test]
    fn rendered_request_reads_back(sp in service_provider()) {
        let request = build_default_request(&Saml2Config::new(sp)).unwrap();
        let parsed = parse_authn_request(&request.to_xml().unwrap()).unwrap();

        prop_assert_eq!(parsed.id.as_str(), request.id());
        prop_assert_eq!(parsed.issuer.as_str(), request.issuer());
        prop_assert_eq!(
            parsed.assertion_consumer_service_url,
            request.assertion_consumer_service_url
        );
        prop_assert_eq!(parsed.protocol_binding, request.protocol_binding);
        prop_assert_eq!(
            parsed.name_id_policy_format,
            request.name_id_policy.and_then(|p| p.format)
        );
        let references = request
            .requested_authn_context
            .map(|c| c.references)
            .unwrap_or_default();
        prop_assert_eq!(parsed.authn_context_refs, references);
    }

    #[test]
    fn blank_entity_id_is_a_configuration_error(id in "[ \t]{0,4}") {
        let config = Saml2Config::new(
            ServiceProviderConfig::new(id, "https://sp.example/")
                .with_sign_on(BindingType::Post, "/acs"),
        );
        let err = build_default_request(&config).unwrap_err();
        prop_assert!(err.is_config_error());
    }
}
