//! Per-site report types.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Report entry for one header a site has a record for.
///
/// A header missing from [`SiteReport::settings`] was never recorded for the
/// site. `value: None` means it was recorded as not sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeaderEntry {
    /// Population share of this exact value.
    Measured { value: Option<String>, percent: f64 },
    /// The share query failed; the rest of the report is still valid.
    Unavailable { value: Option<String> },
}

impl HeaderEntry {
    pub fn value(&self) -> Option<&str> {
        match self {
            HeaderEntry::Measured { value, .. } | HeaderEntry::Unavailable { value } => {
                value.as_deref()
            }
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            HeaderEntry::Measured { percent, .. } => Some(*percent),
            HeaderEntry::Unavailable { .. } => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, HeaderEntry::Unavailable { .. })
    }
}

/// Informational notices shown alongside a report.
///
/// Serialized as `{"code": ..., "message": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The site is not in the dataset.
    NotFound,
    /// The site does not send at least one security header.
    NotSet,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::NotFound => "not_found",
            Notice::NotSet => "not_set",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::NotFound => "This website was not found in our database.",
            Notice::NotSet => "This website does not set some HTTP security headers.",
        }
    }
}

impl Serialize for Notice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut notice = serializer.serialize_struct("Notice", 2)?;
        notice.serialize_field("code", self.code())?;
        notice.serialize_field("message", self.message())?;
        notice.end()
    }
}

/// Security headers a site sends and how common each value is.
///
/// Settings are keyed by header slug in a `BTreeMap` so identical reports
/// serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteReport {
    pub site: String,
    pub found: bool,
    pub notices: Vec<Notice>,
    pub settings: BTreeMap<&'static str, HeaderEntry>,
}

impl SiteReport {
    /// Report for a site without any records.
    pub fn not_found(site: &str) -> Self {
        SiteReport {
            site: site.to_string(),
            found: false,
            notices: vec![Notice::NotFound],
            settings: BTreeMap::new(),
        }
    }

    /// True if any entry could not be measured.
    pub fn is_degraded(&self) -> bool {
        self.settings.values().any(HeaderEntry::is_unavailable)
    }
}
