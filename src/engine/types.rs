use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Dataset-level errors with user-friendly messages.
#[derive(Debug, Error)]
pub enum DataError {
    /// A row is missing a required field. Load continues without the row;
    /// this variant only surfaces when a caller opts into strict handling.
    #[error("Malformed dataset row: {0}")]
    MalformedRow(String),

    /// The dataset could not be fetched or parsed at all. The store stays
    /// empty and every derived query returns an empty collection.
    #[error("Failed to load dataset: {0}")]
    TransportFailure(String),

    /// Load succeeded but yielded zero valid articles. A valid empty state,
    /// surfaced so the caller can distinguish it from a populated store.
    #[error("Dataset contained no valid articles")]
    EmptyDataset,
}

// ============================================================================
// Raw Rows
// ============================================================================

/// One parsed row of the delimited dataset, before validation.
///
/// Produced by [`crate::dataset::parse_table`]; consumed by
/// [`super::RecordStore::load`], which validates required fields and splits
/// the space-delimited `categories`/`tags` cells.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub id: Option<String>,
    pub title: String,
    pub excerpt: String,
    pub url: String,
    pub picture_link: Option<String>,
    /// Space-delimited token list, e.g. `"health mind"`.
    pub categories: String,
    /// Space-delimited token list, e.g. `"sleep habits focus"`.
    pub tags: String,
}

// ============================================================================
// Articles
// ============================================================================

/// One content record. Immutable once loaded — derived views are always new
/// collections, never in-place mutations.
///
/// String fields use `Arc<str>` for cheap cloning into filtered/search result
/// sets, which are rebuilt on every state change.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: Arc<str>,
    pub title: Arc<str>,
    pub excerpt: Arc<str>,
    pub url: Arc<str>,
    pub picture_link: Option<Arc<str>>,
    /// Non-empty; first-seen order from the dataset cell.
    pub categories: Vec<Arc<str>>,
    /// Non-empty; first-seen order from the dataset cell.
    pub tags: Vec<Arc<str>>,
}

impl Article {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| &**c == category)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| &**t == tag)
    }
}

/// Derive a stable article id when the dataset has no id column.
///
/// Hashes `url|title` so the id survives reloads of the same dataset.
pub(crate) fn derive_article_id(url: &str, title: &str) -> String {
    let input = format!("{}|{}", url, title);
    let hash = Sha256::digest(input.as_bytes());
    format!("{:x}", hash)
}

// ============================================================================
// Tag Frequencies
// ============================================================================

/// A distinct tag and its occurrence count within the active article subset.
///
/// Counts are recomputed from scratch on every derivation, never incremented
/// in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFrequency {
    pub name: Arc<str>,
    /// Always >= 1 — a tag only appears here because it was observed.
    pub count: u32,
}

// ============================================================================
// Search
// ============================================================================

/// What a search suggestion points at, so the caller can route a selection:
/// tag -> tag filter, category -> category filter, article -> narrowed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionKind {
    Tag { count: u32 },
    Category,
    Article { id: Arc<str> },
}

/// A search-time candidate offered before full result filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub value: Arc<str>,
    pub kind: SuggestionKind,
}

/// Result of a multi-field search: the matching articles plus a capped,
/// kind-tagged suggestion list.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub results: Vec<Article>,
    pub suggestions: Vec<Suggestion>,
}
