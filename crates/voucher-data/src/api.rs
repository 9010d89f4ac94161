//! The backend's endpoints as a trait.

use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use voucher_core::{
    CodeId, CopyEvent, HealthResponse, ScrapeResponse, SearchResponse, SuggestionId,
    SuggestionsResponse, VerifyEvent,
};

use crate::{ApiConfig, ClientRequestBuilder, FetchClient, FetchError};

const SEARCH_PATH: &str = "/api/codes/search";
const SCRAPE_PATH: &str = "/api/scrape";
const SUGGESTIONS_PATH: &str = "/api/suggestions";
const COPY_PATH: &str = "/api/codes/copy";
const VERIFY_PATH: &str = "/api/suggestions/verify";
const HEALTH_PATH: &str = "/api/health";

/// Calls the VoucherFinder backend understands.
///
/// Futures are not `Send`: everything runs on the single UI thread.
#[async_trait(?Send)]
pub trait VoucherApi {
    /// Look up cached codes for a brand.
    async fn search_codes(&self, brand: &str) -> Result<SearchResponse, FetchError>;

    /// Ask the backend to scrape fresh codes. Can be slow.
    async fn scrape_codes(&self, brand: &str) -> Result<ScrapeResponse, FetchError>;

    /// Fetch AI saving strategies for a brand.
    async fn get_suggestions(&self, brand: &str) -> Result<SuggestionsResponse, FetchError>;

    /// Record that a code was copied.
    async fn track_code_copy(&self, code_id: CodeId) -> Result<(), FetchError>;

    /// Record whether a suggestion worked.
    async fn verify_suggestion(
        &self,
        suggestion_id: SuggestionId,
        worked: bool,
    ) -> Result<(), FetchError>;

    async fn health_check(&self) -> Result<HealthResponse, FetchError>;
}

#[async_trait(?Send)]
impl<T: VoucherApi + ?Sized> VoucherApi for Rc<T> {
    async fn search_codes(&self, brand: &str) -> Result<SearchResponse, FetchError> {
        (**self).search_codes(brand).await
    }

    async fn scrape_codes(&self, brand: &str) -> Result<ScrapeResponse, FetchError> {
        (**self).scrape_codes(brand).await
    }

    async fn get_suggestions(&self, brand: &str) -> Result<SuggestionsResponse, FetchError> {
        (**self).get_suggestions(brand).await
    }

    async fn track_code_copy(&self, code_id: CodeId) -> Result<(), FetchError> {
        (**self).track_code_copy(code_id).await
    }

    async fn verify_suggestion(
        &self,
        suggestion_id: SuggestionId,
        worked: bool,
    ) -> Result<(), FetchError> {
        (**self).verify_suggestion(suggestion_id, worked).await
    }

    async fn health_check(&self) -> Result<HealthResponse, FetchError> {
        (**self).health_check().await
    }
}

/// [`VoucherApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct ApiClient {
    fetch: FetchClient,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let fetch = FetchClient::new()
            .with_base_url(config.base_url.clone())
            .with_default_header("Accept", "application/json");
        Self { fetch }
    }

    /// Client for the backend named by the environment.
    pub fn from_env() -> Self {
        Self::new(&ApiConfig::from_env())
    }

    fn brand_query(&self, path: &str, brand: &str) -> ClientRequestBuilder<'_> {
        self.fetch.get(path).query("brand", brand)
    }

    fn event(&self, path: &str, body: &impl Serialize) -> Result<ClientRequestBuilder<'_>, FetchError> {
        self.fetch.post(path).json(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: ClientRequestBuilder<'_>,
    ) -> Result<T, FetchError> {
        request.send().await?.error_for_status()?.json()
    }

    async fn post_event(&self, request: ClientRequestBuilder<'_>) -> Result<(), FetchError> {
        // Acknowledgment bodies carry nothing the client uses.
        request.send().await?.error_for_status()?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl VoucherApi for ApiClient {
    async fn search_codes(&self, brand: &str) -> Result<SearchResponse, FetchError> {
        self.get_json(self.brand_query(SEARCH_PATH, brand)).await
    }

    async fn scrape_codes(&self, brand: &str) -> Result<ScrapeResponse, FetchError> {
        self.get_json(self.brand_query(SCRAPE_PATH, brand)).await
    }

    async fn get_suggestions(&self, brand: &str) -> Result<SuggestionsResponse, FetchError> {
        self.get_json(self.brand_query(SUGGESTIONS_PATH, brand)).await
    }

    async fn track_code_copy(&self, code_id: CodeId) -> Result<(), FetchError> {
        self.post_event(self.event(COPY_PATH, &CopyEvent { code_id })?)
            .await
    }

    async fn verify_suggestion(
        &self,
        suggestion_id: SuggestionId,
        worked: bool,
    ) -> Result<(), FetchError> {
        let body = VerifyEvent {
            suggestion_id,
            worked,
        };
        self.post_event(self.event(VERIFY_PATH, &body)?).await
    }

    async fn health_check(&self) -> Result<HealthResponse, FetchError> {
        self.get_json(self.fetch.get(HEALTH_PATH)).await
    }
}
