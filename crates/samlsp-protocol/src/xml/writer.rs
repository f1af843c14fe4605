//! AuthnRequest XML rendering.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{SamlError, SamlResult};
use crate::types::{
    AuthnRequest, Conditions, NameId, NameIdPolicy, RequestedAuthnContext, SAMLP_NS, SAMLP_PREFIX,
    SAML_NS, SAML_PREFIX,
};

/// `xs:dateTime` layout used for every timestamp attribute.
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

type XmlWriter = Writer<Vec<u8>>;

impl AuthnRequest {
    /// Renders this request as an XML document.
    ///
    /// The output starts with an XML declaration and binds the `samlp` and
    /// `saml` prefixes on the root element.
    pub fn to_xml(&self) -> SamlResult<String> {
        let mut writer = Writer::new(Vec::new());

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let issue_instant = self.issue_instant().format(DATE_TIME_FORMAT).to_string();
        let xmlns_samlp = format!("xmlns:{SAMLP_PREFIX}");
        let xmlns_saml = format!("xmlns:{SAML_PREFIX}");
        let mut root = BytesStart::new(samlp("AuthnRequest"));
        root.push_attribute((xmlns_samlp.as_str(), SAMLP_NS));
        root.push_attribute((xmlns_saml.as_str(), SAML_NS));
        root.push_attribute(("ID", self.id()));
        root.push_attribute(("Version", self.version.as_str()));
        root.push_attribute(("IssueInstant", issue_instant.as_str()));
        push_opt(&mut root, "Destination", self.destination.as_deref());
        push_opt(&mut root, "Consent", self.consent.as_deref());
        push_opt(&mut root, "ForceAuthn", self.force_authn.map(bool_value));
        push_opt(&mut root, "IsPassive", self.is_passive.map(bool_value));
        push_opt(&mut root, "ProtocolBinding", self.protocol_binding.as_deref());
        push_opt(
            &mut root,
            "AssertionConsumerServiceIndex",
            self.assertion_consumer_service_index
                .map(|i| i.to_string())
                .as_deref(),
        );
        push_opt(
            &mut root,
            "AssertionConsumerServiceURL",
            self.assertion_consumer_service_url.as_deref(),
        );
        push_opt(
            &mut root,
            "AttributeConsumingServiceIndex",
            self.attribute_consuming_service_index
                .map(|i| i.to_string())
                .as_deref(),
        );
        push_opt(&mut root, "ProviderName", self.provider_name.as_deref());
        write(&mut writer, Event::Start(root))?;

        write_issuer(&mut writer, &self.issuer)?;
        if let Some(policy) = &self.name_id_policy {
            write_name_id_policy(&mut writer, policy)?;
        }
        if let Some(conditions) = &self.conditions {
            write_conditions(&mut writer, conditions)?;
        }
        if let Some(context) = &self.requested_authn_context {
            write_requested_authn_context(&mut writer, context)?;
        }

        write(&mut writer, Event::End(BytesEnd::new(samlp("AuthnRequest"))))?;

        String::from_utf8(writer.into_inner()).map_err(|e| SamlError::XmlWrite(e.to_string()))
    }
}

/// Qualified name in the assertion namespace.
fn saml(local: &str) -> String {
    format!("{SAML_PREFIX}:{local}")
}

/// Qualified name in the protocol namespace.
fn samlp(local: &str) -> String {
    format!("{SAMLP_PREFIX}:{local}")
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> SamlResult<()> {
    writer
        .write_event(event)
        .map_err(|e| SamlError::XmlWrite(e.to_string()))
}

fn push_opt(element: &mut BytesStart<'_>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        element.push_attribute((name, value));
    }
}

const fn bool_value(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn write_text_element(
    writer: &mut XmlWriter,
    start: BytesStart<'_>,
    text: &str,
) -> SamlResult<()> {
    let end = start.to_end().into_owned();
    write(writer, Event::Start(start))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(end))
}

fn write_issuer(writer: &mut XmlWriter, issuer: &NameId) -> SamlResult<()> {
    let mut start = BytesStart::new(saml("Issuer"));
    push_opt(&mut start, "NameQualifier", issuer.name_qualifier.as_deref());
    push_opt(&mut start, "SPNameQualifier", issuer.sp_name_qualifier.as_deref());
    push_opt(&mut start, "Format", issuer.format.as_deref());
    write_text_element(writer, start, &issuer.value)
}

fn write_name_id_policy(writer: &mut XmlWriter, policy: &NameIdPolicy) -> SamlResult<()> {
    let mut element = BytesStart::new(samlp("NameIDPolicy"));
    push_opt(&mut element, "Format", policy.format.as_deref());
    push_opt(&mut element, "SPNameQualifier", policy.sp_name_qualifier.as_deref());
    element.push_attribute(("AllowCreate", bool_value(policy.allow_create)));
    write(writer, Event::Empty(element))
}

fn write_conditions(writer: &mut XmlWriter, conditions: &Conditions) -> SamlResult<()> {
    let not_before = conditions
        .not_before
        .map(|t| t.format(DATE_TIME_FORMAT).to_string());
    let not_on_or_after = conditions
        .not_on_or_after
        .map(|t| t.format(DATE_TIME_FORMAT).to_string());

    let mut start = BytesStart::new(saml("Conditions"));
    push_opt(&mut start, "NotBefore", not_before.as_deref());
    push_opt(&mut start, "NotOnOrAfter", not_on_or_after.as_deref());
    write(writer, Event::Start(start))?;

    for restriction in &conditions.audience_restrictions {
        let restriction_name = saml("AudienceRestriction");
        write(writer, Event::Start(BytesStart::new(restriction_name.as_str())))?;
        for audience in &restriction.audiences {
            write_text_element(writer, BytesStart::new(saml("Audience")), audience)?;
        }
        write(writer, Event::End(BytesEnd::new(restriction_name)))?;
    }

    write(writer, Event::End(BytesEnd::new(saml("Conditions"))))
}

fn write_requested_authn_context(
    writer: &mut XmlWriter,
    context: &RequestedAuthnContext,
) -> SamlResult<()> {
    let mut start = BytesStart::new(samlp("RequestedAuthnContext"));
    push_opt(&mut start, "Comparison", context.comparison.map(|c| c.as_str()));
    write(writer, Event::Start(start))?;

    for reference in &context.references {
        let name = saml(reference.kind.element_name());
        write_text_element(writer, BytesStart::new(name), &reference.value)?;
    }

    write(writer, Event::End(BytesEnd::new(samlp("RequestedAuthnContext"))))
}
