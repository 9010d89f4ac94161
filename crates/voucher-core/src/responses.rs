//! JSON envelopes exchanged with the backend.

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::ids::{CodeId, SuggestionId};
use crate::suggestion::AiSuggestion;

/// `GET /api/codes/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub codes: Vec<Code>,
    /// Cached codes are old enough that a fresh scrape is due.
    #[serde(default)]
    pub stale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    /// Whether the cached result should be replaced by a scrape.
    pub fn needs_refresh(&self) -> bool {
        self.codes.is_empty() || self.stale
    }
}

/// `GET /api/scrape`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub codes: Vec<Code>,
}

/// `GET /api/suggestions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<AiSuggestion>,
    #[serde(default)]
    pub cached: bool,
}

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST /api/codes/copy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopyEvent {
    pub code_id: CodeId,
}

/// Body of `POST /api/suggestions/verify`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerifyEvent {
    pub suggestion_id: SuggestionId,
    pub worked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_defaults() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "codes": [],
            "message": "No codes found for Foo. Try /api/scrape to fetch new codes."
        }))
        .unwrap();
        assert!(!resp.stale);
        assert!(resp.needs_refresh());
    }

    #[test]
    fn test_needs_refresh_when_stale() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "codes": [{ "id": 1, "brand": "Foo", "code": "X" }],
            "stale": true
        }))
        .unwrap();
        assert!(resp.needs_refresh());

        let fresh = SearchResponse {
            stale: false,
            ..resp
        };
        assert!(!fresh.needs_refresh());
    }

    #[test]
    fn test_feedback_bodies() {
        let copy = CopyEvent {
            code_id: CodeId::new(5),
        };
        assert_eq!(serde_json::to_value(copy).unwrap(), json!({ "code_id": 5 }));

        let verify = VerifyEvent {
            suggestion_id: SuggestionId::new(8),
            worked: false,
        };
        assert_eq!(
            serde_json::to_value(verify).unwrap(),
            json!({ "suggestion_id": 8, "worked": false })
        );
    }

    #[test]
    fn test_health_response() {
        let health: HealthResponse = serde_json::from_value(json!({
            "status": "healthy",
            "message": "Voucher Scraper API is running"
        }))
        .unwrap();
        assert_eq!(health.status, "healthy");
    }
}
