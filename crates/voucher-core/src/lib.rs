//! Domain types and display rules for VoucherFinder.
//!
//! Everything here arrives read-only from the backend:
//!
//! - **Codes**: discount codes found for a brand, with source and status
//! - **Suggestions**: AI-generated saving strategies that are not codes
//! - **Responses**: the JSON envelopes the backend wraps them in
//! - **Format**: relative dates and pluralised counts used by the views
//!
//! # Example
//!
//! ```rust,ignore
//! use voucher_core::prelude::*;
//!
//! let response: SearchResponse = serde_json::from_str(body)?;
//! if response.needs_refresh() {
//!     // ask the backend to scrape
//! }
//! ```

pub mod code;
pub mod format;
pub mod ids;
pub mod responses;
pub mod suggestion;

pub use code::{Code, CodeStatus};
pub use ids::{CodeId, SuggestionId};
pub use responses::{
    CopyEvent, HealthResponse, ScrapeResponse, SearchResponse, SuggestionsResponse, VerifyEvent,
};
pub use suggestion::{AiSuggestion, RiskLevel};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::code::{Code, CodeStatus};
    pub use crate::format::{count_label, parse_timestamp, pluralize, relative_date};
    pub use crate::ids::{CodeId, SuggestionId};
    pub use crate::responses::{
        CopyEvent, HealthResponse, ScrapeResponse, SearchResponse, SuggestionsResponse,
        VerifyEvent,
    };
    pub use crate::suggestion::{
        show_more_label, visible_suggestions, AiSuggestion, RiskLevel, SUGGESTION_PREVIEW_LIMIT,
    };
}
