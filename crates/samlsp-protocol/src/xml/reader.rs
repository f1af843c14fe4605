//! AuthnRequest XML read-back.
//!
//! Reads the values a rendered request carries back out of the document,
//! e.g. to confirm what a binding or signing step is about to transmit.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

use crate::error::{SamlError, SamlResult};
use crate::types::{AuthnContextComparison, AuthnContextRef, AuthnContextRefKind};

/// Values read from an AuthnRequest document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedAuthnRequest {
    /// The request ID.
    pub id: String,
    /// The issuer value.
    pub issuer: String,
    /// The issue instant, if present.
    pub issue_instant: Option<DateTime<Utc>>,
    /// The destination URL.
    pub destination: Option<String>,
    /// The assertion consumer service URL.
    pub assertion_consumer_service_url: Option<String>,
    /// The requested protocol binding URI.
    pub protocol_binding: Option<String>,
    /// `ForceAuthn`, `None` when the attribute is absent.
    pub force_authn: Option<bool>,
    /// `IsPassive`, `None` when the attribute is absent.
    pub is_passive: Option<bool>,
    /// The requested NameID format.
    pub name_id_policy_format: Option<String>,
    /// The requested SP name qualifier.
    pub sp_name_qualifier: Option<String>,
    /// All audiences, in document order.
    pub audiences: Vec<String>,
    /// The requested comparison.
    pub comparison: Option<AuthnContextComparison>,
    /// Requested authentication context references, in document order.
    pub authn_context_refs: Vec<AuthnContextRef>,
}

/// Element whose text content is being collected.
#[derive(Debug, Clone, Copy)]
enum TextTarget {
    Issuer,
    Audience,
    ContextRef(AuthnContextRefKind),
}

/// Parses an AuthnRequest document.
pub fn parse_authn_request(xml: &str) -> SamlResult<ParsedAuthnRequest> {
    let mut reader = Reader::from_str(xml);

    let mut parsed = ParsedAuthnRequest::default();
    let mut seen_root = false;
    let mut seen_id = false;
    let mut seen_issuer = false;
    let mut target: Option<TextTarget> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                target = match e.local_name().as_ref() {
                    b"Issuer" if !seen_issuer => {
                        seen_issuer = true;
                        Some(TextTarget::Issuer)
                    }
                    b"Audience" => Some(TextTarget::Audience),
                    b"AuthnContextClassRef" => {
                        Some(TextTarget::ContextRef(AuthnContextRefKind::ClassRef))
                    }
                    b"AuthnContextDeclRef" => {
                        Some(TextTarget::ContextRef(AuthnContextRefKind::DeclRef))
                    }
                    _ => None,
                };
                read_attributes(&e, &mut parsed, &mut seen_root, &mut seen_id)?;
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"Issuer" {
                    seen_issuer = true;
                }
                read_attributes(&e, &mut parsed, &mut seen_root, &mut seen_id)?;
            }
            Event::Text(t) => {
                let value = t.unescape()?.into_owned();
                match target {
                    Some(TextTarget::Issuer) => parsed.issuer.push_str(&value),
                    Some(TextTarget::Audience) => parsed.audiences.push(value),
                    Some(TextTarget::ContextRef(kind)) => {
                        parsed.authn_context_refs.push(AuthnContextRef { kind, value });
                    }
                    None => {}
                }
            }
            Event::End(_) => target = None,
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(SamlError::MissingElement("AuthnRequest".to_string()));
    }
    if !seen_id {
        return Err(SamlError::MissingElement("AuthnRequest ID".to_string()));
    }
    if !seen_issuer {
        return Err(SamlError::MissingElement("Issuer".to_string()));
    }

    Ok(parsed)
}

fn read_attributes(
    element: &BytesStart<'_>,
    parsed: &mut ParsedAuthnRequest,
    seen_root: &mut bool,
    seen_id: &mut bool,
) -> SamlResult<()> {
    match element.local_name().as_ref() {
        b"AuthnRequest" => {
            *seen_root = true;
            for attr in element.attributes() {
                let attr = attr?;
                let value = attr.unescape_value()?.into_owned();
                match attr.key.as_ref() {
                    b"ID" => {
                        parsed.id = value;
                        *seen_id = true;
                    }
                    b"IssueInstant" => parsed.issue_instant = Some(parse_date_time(&value)?),
                    b"Destination" => parsed.destination = Some(value),
                    b"AssertionConsumerServiceURL" => {
                        parsed.assertion_consumer_service_url = Some(value);
                    }
                    b"ProtocolBinding" => parsed.protocol_binding = Some(value),
                    b"ForceAuthn" => {
                        parsed.force_authn = Some(parse_bool("ForceAuthn", &value)?);
                    }
                    b"IsPassive" => parsed.is_passive = Some(parse_bool("IsPassive", &value)?),
                    _ => {}
                }
            }
        }
        b"NameIDPolicy" => {
            for attr in element.attributes() {
                let attr = attr?;
                match attr.key.as_ref() {
                    b"Format" => {
                        parsed.name_id_policy_format = Some(attr.unescape_value()?.into_owned());
                    }
                    b"SPNameQualifier" => {
                        parsed.sp_name_qualifier = Some(attr.unescape_value()?.into_owned());
                    }
                    _ => {}
                }
            }
        }
        b"RequestedAuthnContext" => {
            for attr in element.attributes() {
                let attr = attr?;
                if attr.key.as_ref() == b"Comparison" {
                    let value = attr.unescape_value()?;
                    let comparison = AuthnContextComparison::from_str_value(&value)
                        .ok_or_else(|| {
                            SamlError::XmlParse(format!("invalid Comparison value: {value}"))
                        })?;
                    parsed.comparison = Some(comparison);
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn parse_bool(name: &str, value: &str) -> SamlResult<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SamlError::XmlParse(format!("invalid {name} value: {value}"))),
    }
}

fn parse_date_time(value: &str) -> SamlResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| SamlError::XmlParse(format!("invalid IssueInstant {value}: {e}")))
}
