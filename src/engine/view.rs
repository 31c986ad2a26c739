use std::sync::Arc;

use super::filter::{by_category, by_tag, search};
use super::store::{RecordStore, ALL_CATEGORY};
use super::types::{Article, SearchOutcome, Suggestion, SuggestionKind, TagFrequency};

// ============================================================================
// Views
// ============================================================================

/// Which of the browser's interchangeable views is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The weighted tag cloud for the selected category (initial view).
    TagCloud,
    /// The article grid for a clicked tag.
    Articles,
    /// The article grid for the current search term.
    SearchResults,
}

// ============================================================================
// View State Machine
// ============================================================================

/// Tracks the active view and selection context, and re-derives the
/// filtered/search sets from the store on every transition.
///
/// Invariants:
/// - `selected_tag` is `Some` iff the view is `Articles`;
/// - a non-empty `search_term` implies `SearchResults` until cleared;
/// - derived sets are always recomputed from the live store, never served
///   from a stale snapshot — `back()` re-runs the category filter so a
///   changed store is picked up.
#[derive(Debug)]
pub struct ViewStateMachine {
    view: View,
    selected_category: Arc<str>,
    selected_tag: Option<Arc<str>>,
    search_term: String,
    /// Articles for the current category or tag selection.
    filtered: Vec<Article>,
    /// Tag table scoped to the selected category.
    category_tags: Vec<TagFrequency>,
    search_outcome: SearchOutcome,
    /// Window start for presentation layers with limited category slots.
    category_offset: usize,
}

impl ViewStateMachine {
    /// Initial state: tag cloud over the full dataset.
    pub fn new(store: &RecordStore) -> Self {
        let (filtered, category_tags) =
            by_category(store.articles(), store.global_tag_frequencies(), ALL_CATEGORY);
        Self {
            view: View::TagCloud,
            selected_category: Arc::from(ALL_CATEGORY),
            selected_tag: None,
            search_term: String::new(),
            filtered,
            category_tags,
            search_outcome: SearchOutcome::default(),
            category_offset: 0,
        }
    }

    // ========================================================================
    // Snapshot Accessors
    // ========================================================================

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Tag table for the selected category (feeds the layout engine).
    pub fn category_tags(&self) -> &[TagFrequency] {
        &self.category_tags
    }

    /// The article set the active view displays.
    pub fn articles(&self) -> &[Article] {
        match self.view {
            View::SearchResults => &self.search_outcome.results,
            View::TagCloud | View::Articles => &self.filtered,
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.search_outcome.suggestions
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Switch to the tag cloud scoped to `category`.
    ///
    /// Idempotent: re-selecting the active category still re-derives the
    /// filtered set and tag table deterministically.
    pub fn select_category(&mut self, store: &RecordStore, category: &str) {
        self.view = View::TagCloud;
        self.selected_tag = None;
        self.selected_category = Arc::from(category);

        let (filtered, tags) =
            by_category(store.articles(), store.global_tag_frequencies(), category);
        self.filtered = filtered;
        self.category_tags = tags;
    }

    /// Switch to the article grid for `tag`.
    pub fn select_tag(&mut self, store: &RecordStore, tag: &str) {
        self.view = View::Articles;
        self.selected_tag = Some(Arc::from(tag));
        self.filtered = by_tag(store.articles(), tag);

        if self.filtered.is_empty() {
            tracing::warn!(%tag, "No articles found for tag");
        }
    }

    /// Return from the article grid to the tag cloud, re-deriving the
    /// category scope from the live store.
    pub fn back(&mut self, store: &RecordStore) {
        let category = self.selected_category.clone();
        self.select_category(store, &category);
    }

    /// Run a search. A non-blank term switches to `SearchResults`; a blank
    /// term clears the search and returns to the tag cloud with the prior
    /// category context intact.
    pub fn search(&mut self, store: &RecordStore, term: &str) {
        if term.trim().is_empty() {
            self.clear_search(store);
            return;
        }

        self.search_term = term.to_string();
        self.view = View::SearchResults;
        self.search_outcome = search(
            store.articles(),
            store.global_tag_frequencies(),
            store.categories(),
            term,
        );
    }

    /// Drop the search term and outcome, restoring the category-scoped cloud.
    pub fn clear_search(&mut self, store: &RecordStore) {
        self.search_term.clear();
        self.search_outcome = SearchOutcome::default();
        let category = self.selected_category.clone();
        self.select_category(store, &category);
    }

    /// Route a suggestion selection by kind: tag and category suggestions
    /// leave search mode; an article suggestion stays in `SearchResults`,
    /// narrowed to that one article with the term kept for display.
    pub fn select_suggestion(&mut self, store: &RecordStore, suggestion: &Suggestion) {
        match &suggestion.kind {
            SuggestionKind::Tag { .. } => {
                self.search_term.clear();
                self.search_outcome = SearchOutcome::default();
                self.select_tag(store, &suggestion.value);
            }
            SuggestionKind::Category => {
                self.search_term.clear();
                self.search_outcome = SearchOutcome::default();
                self.select_category(store, &suggestion.value);
            }
            SuggestionKind::Article { id } => {
                self.view = View::SearchResults;
                self.search_outcome.results = store
                    .articles()
                    .iter()
                    .filter(|a| a.id == *id || a.title == suggestion.value)
                    .cloned()
                    .collect();
                self.search_outcome.suggestions.clear();
            }
        }
    }

    // ========================================================================
    // Category Strip Windowing
    // ========================================================================

    /// The categories a width-limited strip shows: `"All"` always, plus a
    /// window of `max_visible - 1` regular categories starting at the scroll
    /// offset. When everything fits, the full list is returned.
    pub fn visible_categories(&self, store: &RecordStore, max_visible: usize) -> Vec<Arc<str>> {
        let categories = store.categories();
        if categories.len() <= max_visible || max_visible == 0 {
            return categories.to_vec();
        }

        let regular_slots = max_visible - 1;
        let max_offset = categories.len().saturating_sub(regular_slots + 1);
        let offset = self.category_offset.min(max_offset);

        if offset == 0 {
            return categories[..max_visible].to_vec();
        }

        let mut visible = Vec::with_capacity(max_visible);
        visible.push(categories[0].clone()); // "All"
        visible.extend(
            categories[offset + 1..]
                .iter()
                .take(regular_slots)
                .cloned(),
        );
        visible
    }

    /// Advance the category window by one, wrapping to the start past the
    /// end (the canonical wrap-around contract).
    pub fn shift_categories(&mut self, store: &RecordStore, max_visible: usize) {
        if max_visible == 0 {
            return;
        }
        let regular_slots = max_visible - 1;
        let max_offset = store.categories().len().saturating_sub(regular_slots + 1);

        self.category_offset = if self.category_offset >= max_offset {
            0
        } else {
            self.category_offset + 1
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::RawRow;
    use pretty_assertions::assert_eq;

    fn raw(title: &str, categories: &str, tags: &str) -> RawRow {
        RawRow {
            id: None,
            title: title.to_string(),
            excerpt: format!("About {}", title),
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            picture_link: None,
            categories: categories.to_string(),
            tags: tags.to_string(),
        }
    }

    fn store() -> RecordStore {
        RecordStore::load(vec![
            raw("Sleep Well", "health", "sleep habits"),
            raw("Sharp Focus", "mind", "focus habits"),
            raw("Trail Running", "health fitness", "running"),
        ])
        .unwrap()
    }

    fn tag_names(tags: &[TagFrequency]) -> Vec<String> {
        let mut names: Vec<String> = tags.iter().map(|t| t.name.to_string()).collect();
        names.sort();
        names
    }

    fn titles(articles: &[Article]) -> Vec<String> {
        articles.iter().map(|a| a.title.to_string()).collect()
    }

    #[test]
    fn test_initial_state_is_tag_cloud_over_all() {
        let s = store();
        let machine = ViewStateMachine::new(&s);

        assert_eq!(machine.view(), View::TagCloud);
        assert_eq!(machine.selected_category(), "All");
        assert_eq!(machine.selected_tag(), None);
        assert_eq!(machine.articles().len(), 3);
        assert_eq!(
            tag_names(machine.category_tags()),
            tag_names(s.global_tag_frequencies())
        );
    }

    #[test]
    fn test_select_category_scopes_cloud() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.select_category(&s, "health");
        assert_eq!(machine.view(), View::TagCloud);
        assert_eq!(machine.selected_category(), "health");
        assert_eq!(titles(machine.articles()), vec!["Sleep Well", "Trail Running"]);
        assert_eq!(
            tag_names(machine.category_tags()),
            vec!["habits", "running", "sleep"]
        );
    }

    #[test]
    fn test_select_category_idempotent() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.select_category(&s, "health");
        let once_articles = titles(machine.articles());
        let once_tags = tag_names(machine.category_tags());

        machine.select_category(&s, "health");
        assert_eq!(titles(machine.articles()), once_articles);
        assert_eq!(tag_names(machine.category_tags()), once_tags);
    }

    #[test]
    fn test_select_tag_switches_to_articles() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.select_tag(&s, "habits");
        assert_eq!(machine.view(), View::Articles);
        assert_eq!(machine.selected_tag(), Some("habits"));
        assert_eq!(titles(machine.articles()), vec!["Sleep Well", "Sharp Focus"]);
    }

    #[test]
    fn test_back_restores_category_derivation() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.select_category(&s, "health");
        let expected_articles = titles(machine.articles());
        let expected_tags = tag_names(machine.category_tags());

        machine.select_tag(&s, "sleep");
        machine.back(&s);

        assert_eq!(machine.view(), View::TagCloud);
        assert_eq!(machine.selected_tag(), None);
        assert_eq!(machine.selected_category(), "health");
        assert_eq!(titles(machine.articles()), expected_articles);
        assert_eq!(tag_names(machine.category_tags()), expected_tags);
    }

    #[test]
    fn test_search_nonblank_enters_search_results() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.search(&s, "running");
        assert_eq!(machine.view(), View::SearchResults);
        assert_eq!(machine.search_term(), "running");
        assert_eq!(titles(machine.articles()), vec!["Trail Running"]);
    }

    #[test]
    fn test_search_blank_returns_to_cloud_with_category_intact() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.select_category(&s, "mind");
        machine.search(&s, "focus");
        assert_eq!(machine.view(), View::SearchResults);

        machine.search(&s, "   ");
        assert_eq!(machine.view(), View::TagCloud);
        assert_eq!(machine.selected_category(), "mind");
        assert_eq!(machine.search_term(), "");
        assert!(machine.suggestions().is_empty());
    }

    #[test]
    fn test_select_suggestion_tag_routes_to_tag_view() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.search(&s, "habit");
        let suggestion = machine
            .suggestions()
            .iter()
            .find(|sug| matches!(sug.kind, SuggestionKind::Tag { .. }))
            .cloned()
            .unwrap();

        machine.select_suggestion(&s, &suggestion);
        assert_eq!(machine.view(), View::Articles);
        assert_eq!(machine.selected_tag(), Some("habits"));
        assert_eq!(machine.search_term(), "");
    }

    #[test]
    fn test_select_suggestion_category_clears_term() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.search(&s, "fitness");
        let suggestion = machine
            .suggestions()
            .iter()
            .find(|sug| matches!(sug.kind, SuggestionKind::Category))
            .cloned()
            .unwrap();

        machine.select_suggestion(&s, &suggestion);
        assert_eq!(machine.view(), View::TagCloud);
        assert_eq!(machine.selected_category(), "fitness");
        assert_eq!(machine.search_term(), "");
    }

    #[test]
    fn test_select_suggestion_article_narrows_and_keeps_term() {
        let s = store();
        let mut machine = ViewStateMachine::new(&s);

        machine.search(&s, "sleep");
        let suggestion = machine
            .suggestions()
            .iter()
            .find(|sug| matches!(sug.kind, SuggestionKind::Article { .. }))
            .cloned()
            .unwrap();

        machine.select_suggestion(&s, &suggestion);
        assert_eq!(machine.view(), View::SearchResults);
        assert_eq!(machine.search_term(), "sleep");
        assert_eq!(titles(machine.articles()), vec!["Sleep Well"]);
        assert!(machine.suggestions().is_empty());
    }

    // ========================================================================
    // Category strip windowing
    // ========================================================================

    fn wide_store() -> RecordStore {
        let rows: Vec<RawRow> = (0..6)
            .map(|i| raw(&format!("Article {}", i), &format!("cat{}", i), "tag"))
            .collect();
        RecordStore::load(rows).unwrap()
    }

    #[test]
    fn test_visible_categories_all_fit() {
        let s = store();
        let machine = ViewStateMachine::new(&s);
        // 4 categories total (All + 3), all fit in 5 slots
        let visible = machine.visible_categories(&s, 5);
        assert_eq!(visible.len(), 4);
    }

    #[test]
    fn test_visible_categories_windowed_keeps_all_sentinel() {
        let s = wide_store(); // All + cat0..cat5
        let mut machine = ViewStateMachine::new(&s);

        let visible = machine.visible_categories(&s, 4);
        let names: Vec<&str> = visible.iter().map(|c| &**c).collect();
        assert_eq!(names, vec!["All", "cat0", "cat1", "cat2"]);

        machine.shift_categories(&s, 4);
        let visible = machine.visible_categories(&s, 4);
        let names: Vec<&str> = visible.iter().map(|c| &**c).collect();
        assert_eq!(names, vec!["All", "cat1", "cat2", "cat3"]);
    }

    #[test]
    fn test_shift_categories_wraps_to_start() {
        let s = wide_store(); // 7 categories, window of 4 -> max_offset 3
        let mut machine = ViewStateMachine::new(&s);

        for _ in 0..3 {
            machine.shift_categories(&s, 4);
        }
        let names: Vec<String> = machine
            .visible_categories(&s, 4)
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(names, vec!["All", "cat3", "cat4", "cat5"]);

        // One more shift wraps around
        machine.shift_categories(&s, 4);
        let names: Vec<String> = machine
            .visible_categories(&s, 4)
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(names, vec!["All", "cat0", "cat1", "cat2"]);
    }
}
