//! The query pipeline as seen by a front end.
//!
//! `search → facets → sort → window`. The search result (the baseline) is
//! cached, so facet and sort changes re-run only the cheap stages. Only
//! load-more suspends; everything else completes on the caller's turn.

use super::filtering::{FacetOptionCount, facet_option_counts, filter_cards_with_threshold};
use super::pagination::{LoadTicket, PageWindow, PendingLoad, crossed_scroll_threshold};
use super::search::search;
use super::sorting::{RarityTiers, sort_cards_with};
use super::types::{CatalogQuery, FacetSelection, PageStatus, QueryMode};
use crate::catalog::{CatalogStore, SharedCard};
use crate::config::{EngineConfig, sanitize_scroll_threshold};
use crate::error::Result;
use cardex_model::{FacetCategory, SortKey};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct QueryOrchestrator {
    store: CatalogStore,
    config: EngineConfig,
    tiers: RarityTiers,
    mode: QueryMode,
    raw_query: String,
    selection: FacetSelection,
    sort_key: SortKey,
    /// Search output before facets.
    baseline: Vec<SharedCard>,
    /// Faceted and sorted baseline; the window discloses a prefix of it.
    results: Vec<SharedCard>,
    window: PageWindow,
    /// Parent of every pending load's token; replaced on each reset.
    loads: CancellationToken,
    torn_down: bool,
}

impl QueryOrchestrator {
    /// Build an engine in browse mode. An invalid config is logged and its
    /// window sizes are raised to one.
    pub fn new(store: CatalogStore, mut config: EngineConfig) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!(target: "cardex::query", error = %err, "adjusting engine config");
            config.initial_window = config.initial_window.max(1);
            config.page_increment = config.page_increment.max(1);
            config.scroll_threshold = sanitize_scroll_threshold(config.scroll_threshold);
        }
        Self::build(store, config)
    }

    /// Like [`QueryOrchestrator::new`] but rejects an invalid config.
    pub fn try_new(store: CatalogStore, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    fn build(store: CatalogStore, config: EngineConfig) -> Self {
        let mut window = PageWindow::from_config(&config);
        window.reset(0);
        Self {
            store,
            tiers: RarityTiers::default(),
            mode: QueryMode::Browse,
            raw_query: String::new(),
            selection: config.default_facets.clone(),
            sort_key: config.default_sort,
            baseline: Vec::new(),
            results: Vec::new(),
            window,
            loads: CancellationToken::new(),
            torn_down: false,
            config,
        }
    }

    /// Use a custom rarity ladder for the rarity sorts.
    pub fn with_rarity_tiers(mut self, tiers: RarityTiers) -> Self {
        self.tiers = tiers;
        self.recompute(false);
        self
    }

    /// Run a new search. Facets and sort stay as they are; the window starts
    /// over and pending loads are cancelled.
    pub fn run_search(&mut self, query: &str) {
        self.raw_query = query.to_string();
        self.baseline = search(self.store.records(), query);
        self.mode = QueryMode::Results;
        self.recompute(true);
        tracing::debug!(
            target: "cardex::query",
            query = %self.raw_query,
            baseline = self.baseline.len(),
            results = self.results.len(),
            "search executed"
        );
    }

    /// Apply a full request: facets and sort first, then the search.
    pub fn run_query(&mut self, query: &CatalogQuery) {
        self.selection = query.facets.clone();
        self.sort_key = query.sort;
        self.run_search(&query.query);
    }

    /// Replace the facet selection. The baseline is reused.
    pub fn apply_facets(&mut self, selection: FacetSelection) {
        self.selection = selection;
        self.recompute(false);
    }

    /// Flip one facet option; returns whether it is enabled afterwards.
    pub fn toggle_facet(&mut self, category: FacetCategory, option: &str) -> bool {
        let mut selection = self.selection.clone();
        let enabled = selection.toggle(category, option);
        self.apply_facets(selection);
        enabled
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        if key == self.sort_key {
            return;
        }
        self.sort_key = key;
        self.recompute(false);
    }

    /// Swap in a new catalog snapshot, re-running the current search. The
    /// window keeps its cursor.
    pub fn replace_store(&mut self, store: CatalogStore) {
        self.store = store;
        if self.mode == QueryMode::Results {
            self.baseline = search(self.store.records(), &self.raw_query);
            self.recompute(false);
        }
    }

    /// Back to browse mode with the construction-time facets and sort.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.raw_query.clear();
        self.baseline.clear();
        self.results.clear();
        self.selection = self.config.default_facets.clone();
        self.sort_key = self.config.default_sort;
        self.mode = QueryMode::Browse;
        self.window.reset(0);
        tracing::debug!(target: "cardex::query", "query cleared");
    }

    /// Claim the load-more slot. The caller awaits [`PendingLoad::wait`] and
    /// hands the ticket back through [`QueryOrchestrator::finish_load`].
    pub fn begin_load(&mut self) -> Option<PendingLoad> {
        if self.torn_down || self.mode == QueryMode::Browse {
            return None;
        }
        let ticket = self.window.begin_load()?;
        Some(PendingLoad::new(
            ticket,
            self.config.load_more_latency,
            self.loads.child_token(),
        ))
    }

    /// Apply a completed load. Stale or post-teardown tickets are dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket) -> bool {
        if self.torn_down {
            return false;
        }
        self.window.complete_load(ticket)
    }

    /// Release the slot held by a load that will not complete.
    pub fn abandon_load(&mut self, ticket: LoadTicket) {
        self.window.abandon_load(ticket);
        // A token cancelled from outside would otherwise doom every later load.
        if !self.torn_down && self.loads.is_cancelled() {
            self.loads = CancellationToken::new();
        }
    }

    /// Reveal the next page after the configured latency. Returns whether
    /// anything was revealed; a guarded, exhausted or cancelled request is a
    /// no-op.
    pub async fn load_more(&mut self) -> bool {
        let Some(pending) = self.begin_load() else {
            return false;
        };
        let ticket = pending.ticket();
        match pending.wait().await {
            Ok(ticket) => self.finish_load(ticket),
            Err(err) => {
                tracing::debug!(target: "cardex::pagination", error = %err, "load-more cancelled");
                self.abandon_load(ticket);
                false
            }
        }
    }

    /// Whether a scroll position should trigger a load-more right now.
    pub fn should_load_more(&self, offset: f64, viewport: f64, content: f64) -> bool {
        self.mode == QueryMode::Results
            && !self.torn_down
            && !self.window.is_loading()
            && !self.window.is_exhausted()
            && crossed_scroll_threshold(
                offset,
                viewport,
                content,
                f64::from(self.config.scroll_threshold),
            )
    }

    /// Token that cancels every load currently pending. Cloning it lets
    /// another task abort a load this engine is awaiting.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.loads.clone()
    }

    /// Cancel outstanding loads and refuse new ones.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            self.torn_down = true;
            self.loads.cancel();
            tracing::debug!(target: "cardex::query", "orchestrator torn down");
        }
    }

    // === Accessors ===

    /// The disclosed prefix of the sorted result.
    pub fn visible_results(&self) -> &[SharedCard] {
        &self.results[..self.window.visible()]
    }

    /// The whole sorted result, disclosed or not.
    pub fn results(&self) -> &[SharedCard] {
        &self.results
    }

    pub fn baseline(&self) -> &[SharedCard] {
        &self.baseline
    }

    pub fn page_status(&self) -> PageStatus {
        self.window.status()
    }

    pub fn is_exhausted(&self) -> bool {
        self.window.is_exhausted()
    }

    pub fn is_loading_more(&self) -> bool {
        self.window.is_loading()
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Per-option counts for `category` over the current search results.
    pub fn facet_counts(&self, category: FacetCategory) -> Vec<FacetOptionCount> {
        facet_option_counts(&self.baseline, category)
    }

    fn recompute(&mut self, reset_window: bool) {
        if self.mode == QueryMode::Browse {
            return;
        }
        let filtered = filter_cards_with_threshold(
            &self.baseline,
            &self.selection,
            self.config.parallel_threshold,
        );
        self.results = sort_cards_with(&filtered, self.sort_key, &self.tiers);

        if reset_window {
            self.cancel_pending();
            self.window.reset(self.results.len());
        } else {
            self.window.set_total(self.results.len());
        }
    }

    fn cancel_pending(&mut self) {
        if self.torn_down {
            return;
        }
        let previous = std::mem::replace(&mut self.loads, CancellationToken::new());
        previous.cancel();
    }
}

impl Drop for QueryOrchestrator {
    fn drop(&mut self) {
        self.loads.cancel();
    }
}
