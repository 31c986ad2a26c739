use std::collections::HashSet;
use std::sync::Arc;

use super::frequency::compute_frequencies;
use super::types::{derive_article_id, Article, DataError, RawRow, TagFrequency};
use crate::util::strip_control_chars;

/// Sentinel category that always heads the category list and selects the
/// full article set.
pub const ALL_CATEGORY: &str = "All";

// ============================================================================
// Record Store
// ============================================================================

/// Holds the immutable article list and the indices derived once at load:
/// the ordered category list and the global tag frequency table.
///
/// Everything downstream (category-scoped frequencies, layouts, filtered and
/// searched sets) is a pure function of this store plus the current view
/// state, recomputed on each relevant change.
#[derive(Debug, Default)]
pub struct RecordStore {
    articles: Vec<Article>,
    /// `"All"` first, then categories in first-seen order, deduplicated.
    categories: Vec<Arc<str>>,
    global_tags: Vec<TagFrequency>,
}

impl RecordStore {
    /// Build a store from parsed dataset rows.
    ///
    /// Rows missing a required field (`title`, `url`, `categories`, `tags`)
    /// are skipped with a warning — partial datasets load the rest. This is
    /// the documented tolerance policy; a fully empty result is still `Ok`
    /// (the loader decides whether that deserves [`DataError::EmptyDataset`]).
    pub fn load(rows: Vec<RawRow>) -> Result<Self, DataError> {
        let mut articles = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            match Self::validate_row(row, index) {
                Ok(article) => articles.push(article),
                Err(DataError::MalformedRow(reason)) => {
                    tracing::warn!(row = index, %reason, "Skipping malformed dataset row");
                }
                Err(e) => return Err(e),
            }
        }

        let categories = Self::collect_categories(&articles);
        let global_tags = compute_frequencies(&articles);

        tracing::info!(
            articles = articles.len(),
            categories = categories.len() - 1,
            tags = global_tags.len(),
            "Record store loaded"
        );

        Ok(Self {
            articles,
            categories,
            global_tags,
        })
    }

    /// Validate one raw row into an [`Article`].
    ///
    /// Cell values have control characters stripped before use, and the
    /// `categories`/`tags` cells are split on whitespace. An id is derived
    /// from `url|title` when the dataset carries none.
    fn validate_row(row: RawRow, index: usize) -> Result<Article, DataError> {
        let title = strip_control_chars(row.title.trim());
        let url = strip_control_chars(row.url.trim());

        if title.is_empty() {
            return Err(DataError::MalformedRow(format!("row {}: empty title", index)));
        }
        if url.is_empty() {
            return Err(DataError::MalformedRow(format!("row {}: empty url", index)));
        }

        let categories = split_tokens(&row.categories);
        if categories.is_empty() {
            return Err(DataError::MalformedRow(format!(
                "row {}: no categories",
                index
            )));
        }

        let tags = split_tokens(&row.tags);
        if tags.is_empty() {
            return Err(DataError::MalformedRow(format!("row {}: no tags", index)));
        }

        let id = match row.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => derive_article_id(&url, &title),
        };

        Ok(Article {
            id: Arc::from(id),
            title: Arc::from(title),
            excerpt: Arc::from(strip_control_chars(row.excerpt.trim())),
            url: Arc::from(url),
            picture_link: row
                .picture_link
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(Arc::from),
            categories,
            tags,
        })
    }

    /// `"All"` plus every distinct category in first-seen order.
    fn collect_categories(articles: &[Article]) -> Vec<Arc<str>> {
        let mut seen = HashSet::new();
        let mut categories: Vec<Arc<str>> = vec![Arc::from(ALL_CATEGORY)];
        for article in articles {
            for category in &article.categories {
                if seen.insert(category.clone()) {
                    categories.push(category.clone());
                }
            }
        }
        categories
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn categories(&self) -> &[Arc<str>] {
        &self.categories
    }

    /// Frequency table over the whole dataset, computed once at load.
    pub fn global_tag_frequencies(&self) -> &[TagFrequency] {
        &self.global_tags
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Split a space-delimited token cell, stripping control characters and
/// dropping empty tokens.
fn split_tokens(cell: &str) -> Vec<Arc<str>> {
    strip_control_chars(cell)
        .split_whitespace()
        .map(Arc::from)
        .collect()
}
