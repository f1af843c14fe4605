//! Request conditions.
//!
//! Conditions a service provider asks the identity provider to place on the
//! assertion it issues. Requests built from configuration carry exactly one
//! audience restriction naming the service provider itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conditions on the requested assertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    /// Time before which the assertion is not valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,

    /// Time at or after which the assertion is not valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_on_or_after: Option<DateTime<Utc>>,

    /// Audience restrictions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audience_restrictions: Vec<AudienceRestriction>,
}

impl Conditions {
    /// Creates conditions restricting the assertion to a single audience.
    #[must_use]
    pub fn for_audience(audience: impl Into<String>) -> Self {
        Self::default().with_audience(audience)
    }

    /// Adds an audience restriction with a single audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience_restrictions
            .push(AudienceRestriction::new(audience));
        self
    }

    /// Sets the validity window.
    #[must_use]
    pub fn with_validity(
        mut self,
        not_before: Option<DateTime<Utc>>,
        not_on_or_after: Option<DateTime<Utc>>,
    ) -> Self {
        self.not_before = not_before;
        self.not_on_or_after = not_on_or_after;
        self
    }

    /// Iterates over every audience across all restrictions.
    pub fn audiences(&self) -> impl Iterator<Item = &str> {
        self.audience_restrictions
            .iter()
            .flat_map(|r| r.audiences.iter().map(String::as_str))
    }
}

/// Audience restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceRestriction {
    /// Audiences the assertion may be presented to.
    pub audiences: Vec<String>,
}

impl AudienceRestriction {
    /// Creates a restriction with a single audience.
    #[must_use]
    pub fn new(audience: impl Into<String>) -> Self {
        Self {
            audiences: vec![audience.into()],
        }
    }
}
