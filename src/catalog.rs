//! Header catalog: the fixed registry of tracked security header kinds.
//!
//! Every kind shares the same aggregation and charting logic; kinds differ only
//! in the display metadata held in [`METADATA`]. Adding a header kind means
//! adding an enum variant and one metadata row.

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::config::{
    HEADER_CONTENT_SECURITY_POLICY, HEADER_PUBLIC_KEY_PINS, HEADER_REFERRER_POLICY,
    HEADER_STRICT_TRANSPORT_SECURITY, HEADER_X_CONTENT_TYPE_OPTIONS, HEADER_X_FRAME_OPTIONS,
    HEADER_X_PERMITTED_CROSS_DOMAIN_POLICIES, HEADER_X_XSS_PROTECTION,
};
use crate::error_handling::StatsError;
use crate::stats::ValueDistribution;

/// Chart label used for sites that were scanned but do not send the header.
pub const NOT_SET_LABEL: &str = "(not set)";

const X_LABEL: &str = "Header value";
const Y_LABEL: &str = "Sites";

/// A tracked HTTP security response header.
///
/// Variant order is catalog order (`list_kinds`) and indexes [`METADATA`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum HeaderKind {
    XssProtection,
    ContentSecurityPolicy,
    FrameOptions,
    ContentTypeOptions,
    ReferrerPolicy,
    StrictTransportSecurity,
    PublicKeyPins,
    PermittedCrossDomainPolicies,
}

/// Display metadata for one header kind.
#[derive(Debug)]
pub struct KindMetadata {
    pub kind: HeaderKind,
    /// Route slug, e.g. `x-frame-options`
    pub id: &'static str,
    /// Canonical HTTP header name
    pub name: &'static str,
    /// Chart title
    pub title: &'static str,
}

/// Metadata table, one row per [`HeaderKind`] in declaration order.
pub static METADATA: [KindMetadata; 8] = [
    KindMetadata {
        kind: HeaderKind::XssProtection,
        id: "x-xss-protection",
        name: HEADER_X_XSS_PROTECTION,
        title: "X-XSS-Protection values",
    },
    KindMetadata {
        kind: HeaderKind::ContentSecurityPolicy,
        id: "content-security-policy",
        name: HEADER_CONTENT_SECURITY_POLICY,
        title: "Content-Security-Policy values",
    },
    KindMetadata {
        kind: HeaderKind::FrameOptions,
        id: "x-frame-options",
        name: HEADER_X_FRAME_OPTIONS,
        title: "X-Frame-Options values",
    },
    KindMetadata {
        kind: HeaderKind::ContentTypeOptions,
        id: "x-content-type-options",
        name: HEADER_X_CONTENT_TYPE_OPTIONS,
        title: "X-Content-Type-Options values",
    },
    KindMetadata {
        kind: HeaderKind::ReferrerPolicy,
        id: "referrer-policy",
        name: HEADER_REFERRER_POLICY,
        title: "Referrer-Policy values",
    },
    KindMetadata {
        kind: HeaderKind::StrictTransportSecurity,
        id: "strict-transport-security",
        name: HEADER_STRICT_TRANSPORT_SECURITY,
        title: "Strict-Transport-Security values",
    },
    KindMetadata {
        kind: HeaderKind::PublicKeyPins,
        id: "public-key-pins",
        name: HEADER_PUBLIC_KEY_PINS,
        title: "Public-Key-Pins values",
    },
    KindMetadata {
        kind: HeaderKind::PermittedCrossDomainPolicies,
        id: "x-permitted-cross-domain-policies",
        name: HEADER_X_PERMITTED_CROSS_DOMAIN_POLICIES,
        title: "X-Permitted-Cross-Domain-Policies values",
    },
];

/// Chart-ready view of a value distribution.
///
/// `labels`, `counts` and `percentages` are parallel arrays in bucket order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub header: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub percentages: Vec<f64>,
    pub total_sites: u64,
}

/// Catalog listing entry served on `/api/v1/headers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
}

impl HeaderKind {
    pub fn metadata(self) -> &'static KindMetadata {
        &METADATA[self as usize]
    }

    /// Route slug.
    pub fn id(self) -> &'static str {
        self.metadata().id
    }

    /// Canonical HTTP header name.
    pub fn name(self) -> &'static str {
        self.metadata().name
    }

    pub fn summary(self) -> KindSummary {
        let meta = self.metadata();
        KindSummary {
            id: meta.id,
            name: meta.name,
            title: meta.title,
        }
    }

    /// Maps a recorded header name (any case) back to its kind.
    pub fn from_header_name(name: &str) -> Option<HeaderKind> {
        HeaderKind::iter().find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Formats a distribution of this kind for charting.
    pub fn to_chart(self, distribution: &ValueDistribution) -> ChartPayload {
        let meta = self.metadata();
        let buckets = &distribution.buckets;
        ChartPayload {
            header: meta.id,
            name: meta.name,
            title: meta.title,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            labels: buckets
                .iter()
                .map(|b| b.value.clone().unwrap_or_else(|| NOT_SET_LABEL.to_string()))
                .collect(),
            counts: buckets.iter().map(|b| b.count).collect(),
            percentages: buckets.iter().map(|b| b.percent).collect(),
            total_sites: distribution.total_sites,
        }
    }
}

/// All registered kinds in catalog order.
pub fn list_kinds() -> Vec<HeaderKind> {
    HeaderKind::iter().collect()
}

/// Looks up a kind by its route slug.
///
/// # Errors
///
/// Returns `StatsError::UnknownHeaderKind` when the slug is not registered.
pub fn resolve(id: &str) -> Result<HeaderKind, StatsError> {
    HeaderKind::iter()
        .find(|kind| kind.id().eq_ignore_ascii_case(id))
        .ok_or_else(|| StatsError::UnknownHeaderKind(id.to_string()))
}
