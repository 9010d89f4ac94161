//! Search orchestration for the top-level view.
//!
//! A search first asks the backend for cached codes. An empty or stale
//! result triggers a scrape, run concurrently with the suggestions request;
//! a fresh result is shown immediately and suggestions follow. On failure
//! the view gets one generic error and, best effort, suggestions alone.
//!
//! Overlapping searches are sequenced: each invocation gets a number and
//! only the most recently started one may change the view.

use std::cell::{Cell, RefCell};

use futures::join;
use tracing::{debug, error, info, warn};
use voucher_core::{AiSuggestion, Code};
use voucher_data::{FetchError, VoucherApi};

/// The one error message users ever see for a failed search.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch codes. Please try again.";

/// Everything the results view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Brand of the current (or last) search.
    pub query: String,
    pub codes: Vec<Code>,
    pub suggestions: Vec<AiSuggestion>,
    pub error: Option<String>,
    pub loading: bool,
    pub has_searched: bool,
}

impl SearchState {
    /// Nothing found at all for a completed search.
    pub fn is_empty_result(&self) -> bool {
        self.has_searched && !self.loading && self.codes.is_empty() && self.suggestions.is_empty()
    }

    /// No search has been run yet.
    pub fn is_welcome(&self) -> bool {
        !self.has_searched && !self.loading
    }

    /// Which panel the results area shows.
    pub fn layout(&self) -> Layout {
        if self.is_welcome() {
            Layout::Welcome
        } else if !self.codes.is_empty() || !self.suggestions.is_empty() {
            Layout::Results
        } else if self.loading {
            Layout::Loading
        } else {
            Layout::Empty
        }
    }
}

/// Top-level panel of the results area.
///
/// Stays `Results` from the first arriving data until the next search starts,
/// so a view keyed on it keeps its cards across later commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Welcome,
    Loading,
    Empty,
    Results,
}

type Observer = Box<dyn Fn(&SearchState)>;

/// Drives a search and owns the resulting view state.
pub struct SearchOrchestrator<A> {
    api: A,
    state: RefCell<SearchState>,
    latest: Cell<u64>,
    observer: Option<Observer>,
}

impl<A: VoucherApi> SearchOrchestrator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RefCell::new(SearchState::default()),
            latest: Cell::new(0),
            observer: None,
        }
    }

    /// Call `observer` with a snapshot after every accepted state change.
    pub fn with_observer(mut self, observer: impl Fn(&SearchState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Sequence number of the most recently started search (0 before any).
    pub fn latest_sequence(&self) -> u64 {
        self.latest.get()
    }

    /// Search for a brand and publish the results.
    ///
    /// Blank input is ignored. Returns the sequence number assigned to this
    /// search; its results are dropped if a newer search starts meanwhile.
    pub async fn search(&self, brand: &str) -> Option<u64> {
        let brand = brand.trim();
        if brand.is_empty() {
            return None;
        }

        let seq = self.latest.get() + 1;
        self.latest.set(seq);
        info!(brand, seq, "search started");

        self.commit(seq, |state| {
            *state = SearchState {
                query: brand.to_string(),
                loading: true,
                has_searched: true,
                ..SearchState::default()
            };
        });

        if let Err(error) = self.fetch_results(seq, brand).await {
            error!(brand, seq, %error, "search failed");
            self.commit(seq, |state| {
                state.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            });
            self.fallback_suggestions(seq, brand).await;
        }

        if self.commit(seq, |state| state.loading = false) {
            let state = self.state.borrow();
            info!(
                brand,
                seq,
                codes = state.codes.len(),
                suggestions = state.suggestions.len(),
                failed = state.error.is_some(),
                "search finished"
            );
        }
        Some(seq)
    }

    async fn fetch_results(&self, seq: u64, brand: &str) -> Result<(), FetchError> {
        let found = self.api.search_codes(brand).await?;

        if found.needs_refresh() {
            debug!(brand, seq, cached = found.codes.len(), stale = found.stale, "refreshing codes");
            let (scraped, suggestions) =
                join!(self.api.scrape_codes(brand), self.api.get_suggestions(brand));
            let scraped = scraped?;
            let suggestions = suggestions?;
            if !scraped.success {
                debug!(brand, seq, message = %scraped.message, "scrape reported no success");
            }

            self.commit(seq, |state| {
                state.codes = scraped.codes;
                state.suggestions = suggestions.suggestions;
            });
        } else {
            debug!(brand, seq, cached = found.codes.len(), "using cached codes");
            self.commit(seq, |state| state.codes = found.codes);

            let suggestions = self.api.get_suggestions(brand).await?;
            self.commit(seq, |state| state.suggestions = suggestions.suggestions);
        }

        Ok(())
    }

    async fn fallback_suggestions(&self, seq: u64, brand: &str) {
        match self.api.get_suggestions(brand).await {
            Ok(response) => {
                self.commit(seq, |state| state.suggestions = response.suggestions);
            }
            Err(error) => warn!(brand, seq, %error, "fallback suggestions failed"),
        }
    }

    /// Apply `update` if `seq` is still the latest search, then notify.
    fn commit(&self, seq: u64, update: impl FnOnce(&mut SearchState)) -> bool {
        if seq != self.latest.get() {
            debug!(seq, latest = self.latest.get(), "discarding superseded result");
            return false;
        }

        update(&mut *self.state.borrow_mut());
        if let Some(observer) = &self.observer {
            observer(&self.state.borrow());
        }
        true
    }
}
