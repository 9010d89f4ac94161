//! Discount codes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::format::{count_label, parse_timestamp, relative_date};
use crate::ids::CodeId;

/// Verification status of a code as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStatus {
    Verified,
    #[default]
    Unverified,
    Expired,
}

impl CodeStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Unverified => "unverified",
            Self::Expired => "expired",
        }
    }

    /// Glyph shown next to the status badge.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Verified => "✓",
            Self::Unverified => "○",
            Self::Expired => "✗",
        }
    }

    /// CSS class for the status badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Verified => "status-verified",
            Self::Unverified => "status-unverified",
            Self::Expired => "status-expired",
        }
    }

    /// Badge text, e.g. "✓ verified".
    pub fn badge(&self) -> String {
        format!("{} {}", self.marker(), self.as_str())
    }
}

/// A discount code found for a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub id: CodeId,
    pub brand: String,
    pub code: String,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub discount_description: Option<String>,
    /// Source site or platform name, e.g. "YouTube".
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_url: Option<String>,
    /// Creator credited for the code, when the source has one.
    #[serde(default)]
    pub source_creator: Option<String>,
    #[serde(default)]
    pub status: CodeStatus,
    #[serde(default)]
    pub date_found: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub uses_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Code {
    /// Discount line, e.g. "20% off - first month".
    ///
    /// A zero percentage counts as absent.
    pub fn discount_display(&self) -> Option<String> {
        let percentage = self
            .discount_percentage
            .filter(|p| *p != 0.0)
            .map(|p| format!("{}% off", p));
        let description = self
            .discount_description
            .as_deref()
            .filter(|d| !d.is_empty());

        match (percentage, description) {
            (Some(p), Some(d)) => Some(format!("{} - {}", p, d)),
            (Some(p), None) => Some(p),
            (None, Some(d)) => Some(d.to_string()),
            (None, None) => None,
        }
    }

    /// Who to credit: the creator when known, else the source name.
    pub fn source_display(&self) -> &str {
        self.source_creator
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.source)
    }

    pub fn is_youtube(&self) -> bool {
        self.source == "YouTube"
    }

    /// Usage line, e.g. "3 people". `None` until someone has used it.
    pub fn uses_display(&self) -> Option<String> {
        (self.uses_count > 0).then(|| count_label(self.uses_count.into(), "person", "people"))
    }

    /// When the code was found.
    pub fn found_at(&self) -> Option<NaiveDateTime> {
        self.date_found.as_deref().and_then(parse_timestamp)
    }

    /// "Posted" label relative to `now`, e.g. "3 days ago".
    pub fn found_label(&self, now: NaiveDateTime) -> Option<String> {
        self.found_at().map(|found| relative_date(found, now))
    }

    pub fn expires_at(&self) -> Option<NaiveDateTime> {
        self.expiry_date.as_deref().and_then(parse_timestamp)
    }
}
