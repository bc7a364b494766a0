//! The browsing state machine.

use billboard_client::{CatalogClient, CatalogError, CatalogQuery, Page};
use billboard_common::Event;
use chrono::Local;
use thiserror::Error;

use crate::cursor::PageCursor;
use crate::filters::{FilterPatch, FilterSet};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog fetch failed: {0}")]
    Fetch(#[from] CatalogError),
}

/// Whether an issued fetch replaces the result list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Replace,
    Append,
}

/// A fetch the engine has issued but not yet resolved. Carries the request
/// token that decides, at apply time, whether the response is still
/// authoritative.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    pub token: u64,
    pub kind: FetchKind,
    pub query: CatalogQuery,
    /// The window this fetch was issued for.
    pub cursor: PageCursor,
}

/// Outcome of handing a response back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response was authoritative and the state now reflects it.
    Current,
    /// A newer fetch had superseded this one; nothing changed.
    Stale,
}

/// Single source of truth for "what events are visible and is there more to
/// load" in one browsing context.
///
/// Owns the [`FilterSet`], the [`PageCursor`] and the accumulated result
/// list outright; collaborators come in through the injected
/// [`CatalogClient`]. Responses are applied in request-token order: each
/// issued fetch gets a token from a monotonically increasing counter, and
/// only the latest token may mutate state, so a slow early response can
/// never clobber a faster later one.
///
/// The async operations (`set_filters`, `load_more`, ...) issue and resolve
/// a fetch in one call. Hosts that multiplex several in-flight requests on
/// their own event loop drive the same machinery through the split-phase
/// pair [`begin_fetch`](Self::begin_fetch) /
/// [`apply_response`](Self::apply_response).
pub struct BrowsingEngine<C> {
    client: C,
    page_size: u32,
    filters: FilterSet,
    cursor: PageCursor,
    items: Vec<Event>,
    total_count: u32,
    has_more: bool,
    loading: bool,
    error: Option<EngineError>,
    cities: Vec<String>,
    genres: Vec<String>,
    last_token: u64,
}

impl<C: CatalogClient> BrowsingEngine<C> {
    pub fn new(client: C, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
            filters: FilterSet::default(),
            cursor: PageCursor::initial(page_size),
            items: Vec::new(),
            total_count: 0,
            has_more: true,
            loading: false,
            error: None,
            cities: Vec::new(),
            genres: Vec::new(),
            last_token: 0,
        }
    }

    // --- Read accessors ------------------------------------------------

    pub fn items(&self) -> &[Event] {
        &self.items
    }

    /// The featured subset, in list order, for the showcase strip.
    pub fn featured(&self) -> Vec<&Event> {
        self.items.iter().filter(|e| e.is_featured).collect()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&EngineError> {
        self.error.as_ref()
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    // --- Operations ----------------------------------------------------

    /// Merge `patch` into the active filters, reset pagination and fetch
    /// the first page of the new result set. The current list is replaced
    /// wholesale, never appended to.
    pub async fn set_filters(&mut self, patch: FilterPatch) {
        self.filters = self.filters.merged(&patch);
        self.run_fetch(FetchKind::Replace).await;
    }

    /// Restore the all-absent default filters and fetch from the start.
    pub async fn reset_filters(&mut self) {
        self.filters = FilterSet::default();
        self.run_fetch(FetchKind::Replace).await;
    }

    /// Re-issue the current query from the first page. Also the retry
    /// vehicle after a failed fetch.
    pub async fn refresh(&mut self) {
        self.run_fetch(FetchKind::Replace).await;
    }

    /// Fetch the next page and append it. No-op while a fetch is in flight
    /// or when the service has nothing further.
    pub async fn load_more(&mut self) {
        if !self.has_more || self.loading {
            return;
        }
        self.run_fetch(FetchKind::Append).await;
    }

    /// Load the distinct city/genre vocabularies for filter controls.
    /// Failures are logged and leave the cached lists untouched; they do not
    /// disturb the browsing state.
    pub async fn load_vocabularies(&mut self) {
        match self.client.fetch_cities().await {
            Ok(cities) => self.cities = cities,
            Err(e) => tracing::warn!(error = %e, "city vocabulary fetch failed"),
        }
        match self.client.fetch_genres().await {
            Ok(genres) => self.genres = genres,
            Err(e) => tracing::warn!(error = %e, "genre vocabulary fetch failed"),
        }
    }

    /// Single-event detail lookup. Does not touch list state.
    pub async fn fetch_event(&self, id: i64) -> Result<Event, EngineError> {
        Ok(self.client.fetch_event(id).await?)
    }

    // --- Split-phase fetch core ----------------------------------------

    /// Merge filters without fetching. Building block for hosts driving the
    /// split-phase API; pair with a `Replace` fetch to keep pagination
    /// consistent with the new criteria.
    pub fn merge_filters(&mut self, patch: FilterPatch) {
        self.filters = self.filters.merged(&patch);
    }

    /// Issue a fetch: allocate the next request token (superseding any
    /// fetch still in flight) and mark the engine loading. A `Replace`
    /// fetch targets the first page; an `Append` fetch targets the window
    /// right after everything fetched so far. Neither the cursor nor the
    /// result list changes here; both commit only when the response is
    /// applied, so a failure leaves the last good state visible.
    pub fn begin_fetch(&mut self, kind: FetchKind) -> PendingFetch {
        let window = match kind {
            FetchKind::Replace => PageCursor::initial(self.page_size),
            FetchKind::Append => self.cursor,
        };
        self.last_token += 1;
        self.loading = true;
        self.error = None;

        let today = Local::now().date_naive();
        let query = self.filters.to_query(window, today);
        tracing::debug!(
            token = self.last_token,
            skip = query.skip,
            limit = query.limit,
            "issuing catalog fetch"
        );
        PendingFetch {
            token: self.last_token,
            kind,
            query,
            cursor: window,
        }
    }

    /// Apply a resolved fetch. A response whose token is no longer the
    /// latest is discarded whole: in-flight requests are never hard
    /// cancelled, stale responses are simply ignored on arrival, so state
    /// always reflects the newest request whatever order responses land in.
    pub fn apply_response(
        &mut self,
        pending: &PendingFetch,
        result: Result<Page, CatalogError>,
    ) -> Applied {
        if pending.token != self.last_token {
            tracing::debug!(
                token = pending.token,
                current = self.last_token,
                "discarding stale catalog response"
            );
            return Applied::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                let fetched = page.items.len() as u32;
                match pending.kind {
                    FetchKind::Replace => self.items = page.items,
                    FetchKind::Append => {
                        for event in page.items {
                            if !self.items.iter().any(|e| e.id == event.id) {
                                self.items.push(event);
                            }
                        }
                    }
                }
                self.total_count = page.total_count;
                self.cursor = pending.cursor.advanced_by(fetched);
                // Recomputed every fetch; a shrinking total simply reads as
                // "no more", never as a negative remainder.
                self.has_more = self.cursor.offset < self.total_count;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(token = pending.token, error = %e, "catalog fetch failed");
                self.error = Some(EngineError::Fetch(e));
            }
        }
        Applied::Current
    }

    async fn run_fetch(&mut self, kind: FetchKind) {
        let pending = self.begin_fetch(kind);
        let result = self.client.fetch_page(&pending.query).await;
        self.apply_response(&pending, result);
    }
}
