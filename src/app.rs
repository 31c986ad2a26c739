//! The browser facade: the consumer-facing surface of the engine.
//!
//! [`Browser`] composes the record store, the view state machine, and the
//! search-history store, and exposes the operations a presentation layer
//! drives: category/tag selection, back navigation, search, suggestion
//! routing, and tag cloud layout. All derivation is synchronous and
//! recomputed from the store snapshot — callers that want keystroke or
//! resize coalescing wrap their calls in a [`crate::scheduler::UpdateScheduler`].

use std::sync::Arc;

use crate::engine::{
    layout, Article, CloudLayout, DeviceClass, RecordStore, Suggestion, TagFrequency, View,
    ViewStateMachine,
};
use crate::history::{HistoryStore, POPULAR_LIMIT};

// ============================================================================
// Browser
// ============================================================================

pub struct Browser {
    store: RecordStore,
    view: ViewStateMachine,
    history: Box<dyn HistoryStore + Send>,
}

impl Browser {
    /// Wrap a loaded store. The history store is injected so tests can use
    /// an in-memory fake and sessions can opt out of persistence.
    pub fn new(store: RecordStore, history: Box<dyn HistoryStore + Send>) -> Self {
        let view = ViewStateMachine::new(&store);
        Self {
            store,
            view,
            history,
        }
    }

    // ========================================================================
    // Snapshot Accessors
    // ========================================================================

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn active_view(&self) -> View {
        self.view.view()
    }

    pub fn selected_category(&self) -> &str {
        self.view.selected_category()
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.view.selected_tag()
    }

    pub fn search_term(&self) -> &str {
        self.view.search_term()
    }

    /// The article set the active view displays: the category/tag filtered
    /// list, or the search results while searching.
    pub fn articles(&self) -> &[Article] {
        self.view.articles()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.view.suggestions()
    }

    /// Tag table for the selected category — the input to [`tag_layout`].
    ///
    /// [`tag_layout`]: Browser::tag_layout
    pub fn category_tags(&self) -> &[TagFrequency] {
        self.view.category_tags()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    pub fn select_category(&mut self, category: &str) {
        self.view.select_category(&self.store, category);
    }

    pub fn select_tag(&mut self, tag: &str) {
        self.view.select_tag(&self.store, tag);
    }

    pub fn back(&mut self) {
        self.view.back(&self.store);
    }

    pub fn search(&mut self, term: &str) {
        self.view.search(&self.store, term);
    }

    /// Route a suggestion selection and count it in the search history.
    pub fn select_suggestion(&mut self, suggestion: &Suggestion) {
        self.history.record(&suggestion.value);
        self.view.select_suggestion(&self.store, suggestion);
    }

    /// Pack the current category's tags into rows for the given container.
    pub fn tag_layout(&self, container_width: f32, device: DeviceClass) -> CloudLayout {
        layout(self.view.category_tags(), container_width, device)
    }

    pub fn visible_categories(&self, max_visible: usize) -> Vec<Arc<str>> {
        self.view.visible_categories(&self.store, max_visible)
    }

    pub fn shift_categories(&mut self, max_visible: usize) {
        self.view.shift_categories(&self.store, max_visible);
    }

    // ========================================================================
    // Search History
    // ========================================================================

    /// Count a committed search term (suggestion picks are counted by
    /// [`select_suggestion`]).
    ///
    /// [`select_suggestion`]: Browser::select_suggestion
    pub fn record_search(&mut self, term: &str) {
        self.history.record(term);
    }

    /// Top five search terms by use, for the empty-search prompt.
    pub fn popular_searches(&self) -> Vec<String> {
        self.history.popular(POPULAR_LIMIT)
    }
}
