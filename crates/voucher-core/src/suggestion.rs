//! AI-generated saving strategies.

use serde::{Deserialize, Serialize};

use crate::format::pluralize;
use crate::ids::SuggestionId;

/// Number of suggestions shown before the list is expanded.
pub const SUGGESTION_PREVIEW_LIMIT: usize = 3;

/// How risky the backend judges a strategy to be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Safe,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }
}

/// A non-code way to save money on a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub id: SuggestionId,
    pub brand: String,
    /// Snake-case strategy tag, e.g. "student_discount".
    pub suggestion_type: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub estimated_savings: Option<f64>,
    #[serde(default)]
    pub estimated_savings_description: Option<String>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub pro_tip: Option<String>,
    /// 0-100.
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub verification_count: u32,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AiSuggestion {
    /// Strategy tag with underscores turned into spaces.
    pub fn type_label(&self) -> String {
        self.suggestion_type.replace('_', " ")
    }

    /// "Save $12.99", only for a strictly positive estimate.
    pub fn savings_display(&self) -> Option<String> {
        self.estimated_savings
            .filter(|amount| *amount > 0.0)
            .map(|amount| format!("Save ${:.2}", amount))
    }

    /// "4 people verified this", or an invitation when nobody has yet.
    pub fn verification_display(&self) -> String {
        if self.verification_count == 0 {
            return "Be the first to try this".to_string();
        }
        format!(
            "{} {} verified this",
            self.verification_count,
            pluralize(self.verification_count.into(), "person", "people")
        )
    }

    /// "87% confidence", only once someone verified it and the score is positive.
    pub fn confidence_display(&self) -> Option<String> {
        (self.verification_count > 0 && self.confidence_score > 0.0)
            .then(|| format!("{}% confidence", self.confidence_score.round()))
    }
}

/// The suggestions to render given the "show all" toggle.
pub fn visible_suggestions(suggestions: &[AiSuggestion], expanded: bool) -> &[AiSuggestion] {
    if expanded {
        suggestions
    } else {
        &suggestions[..suggestions.len().min(SUGGESTION_PREVIEW_LIMIT)]
    }
}

/// Label of the "show more" toggle, or `None` when everything already fits.
pub fn show_more_label(total: usize, expanded: bool) -> Option<String> {
    if total <= SUGGESTION_PREVIEW_LIMIT {
        return None;
    }
    Some(if expanded {
        "Show Less".to_string()
    } else {
        format!("Show {} More", total - SUGGESTION_PREVIEW_LIMIT)
    })
}
