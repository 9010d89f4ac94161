//! Scripted in-memory backend and clipboard for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use voucher_core::{
    AiSuggestion, Code, CodeId, CodeStatus, HealthResponse, RiskLevel, ScrapeResponse,
    SearchResponse, SuggestionId, SuggestionsResponse,
};
use voucher_data::{FetchError, VoucherApi};

use crate::{Clipboard, ClipboardError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Scrape,
    Suggestions,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Started(Endpoint, String),
    Finished(Endpoint, String),
    TrackCopy(CodeId),
    Verify(SuggestionId, bool),
}

type Reply<T> = Result<T, u16>;

/// Backend whose replies are scripted per brand.
///
/// Every brand-keyed call yields to the executor once between recording its
/// start and its finish, so concurrent calls interleave observably. Brands
/// with no scripted reply get a 404.
#[derive(Default)]
pub struct FakeApi {
    search: RefCell<HashMap<String, Reply<SearchResponse>>>,
    scrape: RefCell<HashMap<String, Reply<ScrapeResponse>>>,
    suggestions: RefCell<HashMap<String, Reply<SuggestionsResponse>>>,
    search_delay: RefCell<HashMap<String, usize>>,
    fail_feedback: Cell<bool>,
    calls: RefCell<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_returns(self, brand: &str, codes: Vec<Code>, stale: bool) -> Self {
        let reply = SearchResponse {
            codes,
            stale,
            message: None,
        };
        self.search.borrow_mut().insert(brand.to_string(), Ok(reply));
        self
    }

    pub fn search_fails(self, brand: &str, status: u16) -> Self {
        self.search.borrow_mut().insert(brand.to_string(), Err(status));
        self
    }

    /// Make the search call for `brand` yield `polls` extra times.
    pub fn search_delayed(self, brand: &str, polls: usize) -> Self {
        self.search_delay.borrow_mut().insert(brand.to_string(), polls);
        self
    }

    pub fn scrape_returns(self, brand: &str, codes: Vec<Code>) -> Self {
        let reply = ScrapeResponse {
            success: true,
            message: format!("Found {} codes", codes.len()),
            codes,
        };
        self.scrape.borrow_mut().insert(brand.to_string(), Ok(reply));
        self
    }

    pub fn scrape_fails(self, brand: &str, status: u16) -> Self {
        self.scrape.borrow_mut().insert(brand.to_string(), Err(status));
        self
    }

    pub fn suggestions_return(self, brand: &str, suggestions: Vec<AiSuggestion>) -> Self {
        let reply = SuggestionsResponse {
            suggestions,
            cached: false,
        };
        self.suggestions
            .borrow_mut()
            .insert(brand.to_string(), Ok(reply));
        self
    }

    pub fn suggestions_fail(self, brand: &str, status: u16) -> Self {
        self.suggestions
            .borrow_mut()
            .insert(brand.to_string(), Err(status));
        self
    }

    /// Make copy tracking and verification fail.
    pub fn feedback_fails(self) -> Self {
        self.fail_feedback.set(true);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn started(&self, endpoint: Endpoint) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Started(e, _) if *e == endpoint))
            .count()
    }

    async fn brand_call<T: Clone>(
        &self,
        endpoint: Endpoint,
        brand: &str,
        replies: &RefCell<HashMap<String, Reply<T>>>,
        extra_polls: usize,
    ) -> Result<T, FetchError> {
        self.record(Call::Started(endpoint, brand.to_string()));
        for _ in 0..=extra_polls {
            YieldOnce::default().await;
        }
        self.record(Call::Finished(endpoint, brand.to_string()));

        let reply = replies.borrow().get(brand).cloned().unwrap_or(Err(404));
        reply.map_err(|status| FetchError::HttpError {
            status,
            message: format!("scripted failure for {}", brand),
        })
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn feedback_result(&self) -> Result<(), FetchError> {
        if self.fail_feedback.get() {
            Err(FetchError::RequestError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl VoucherApi for FakeApi {
    async fn search_codes(&self, brand: &str) -> Result<SearchResponse, FetchError> {
        let delay = self.search_delay.borrow().get(brand).copied().unwrap_or(0);
        self.brand_call(Endpoint::Search, brand, &self.search, delay)
            .await
    }

    async fn scrape_codes(&self, brand: &str) -> Result<ScrapeResponse, FetchError> {
        self.brand_call(Endpoint::Scrape, brand, &self.scrape, 0)
            .await
    }

    async fn get_suggestions(&self, brand: &str) -> Result<SuggestionsResponse, FetchError> {
        self.brand_call(Endpoint::Suggestions, brand, &self.suggestions, 0)
            .await
    }

    async fn track_code_copy(&self, code_id: CodeId) -> Result<(), FetchError> {
        self.record(Call::TrackCopy(code_id));
        self.feedback_result()
    }

    async fn verify_suggestion(
        &self,
        suggestion_id: SuggestionId,
        worked: bool,
    ) -> Result<(), FetchError> {
        self.record(Call::Verify(suggestion_id, worked));
        self.feedback_result()
    }

    async fn health_check(&self) -> Result<HealthResponse, FetchError> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
            message: None,
        })
    }
}

/// Clipboard that remembers what was written.
#[derive(Default)]
pub struct FakeClipboard {
    pub written: RefCell<Vec<String>>,
    pub fail: bool,
}

#[async_trait(?Send)]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::WriteFailed("permission denied".to_string()));
        }
        self.written.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Returns `Pending` once, then completes.
#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

pub fn code(id: i64, brand: &str, code: &str) -> Code {
    Code {
        id: CodeId::new(id),
        brand: brand.to_string(),
        code: code.to_string(),
        discount_percentage: Some(20.0),
        discount_description: None,
        source: "YouTube".to_string(),
        source_url: None,
        source_creator: Some("Creator".to_string()),
        status: CodeStatus::Unverified,
        date_found: Some("2024-01-10T08:00:00".to_string()),
        expiry_date: None,
        uses_count: 0,
        created_at: Some("2024-01-10T08:00:00".to_string()),
    }
}

pub fn codes(brand: &str, count: i64) -> Vec<Code> {
    (1..=count)
        .map(|i| code(i, brand, &format!("{}{}", brand.to_uppercase(), i)))
        .collect()
}

pub fn suggestion(id: i64, brand: &str) -> AiSuggestion {
    AiSuggestion {
        id: SuggestionId::new(id),
        brand: brand.to_string(),
        suggestion_type: "free_trial".to_string(),
        title: "Start with a free trial".to_string(),
        description: "New accounts get 30 days free.".to_string(),
        estimated_savings: Some(12.99),
        estimated_savings_description: Some("first month".to_string()),
        conditions: None,
        pro_tip: None,
        confidence_score: 80.0,
        verification_count: 2,
        risk_level: RiskLevel::Safe,
        created_at: None,
    }
}
