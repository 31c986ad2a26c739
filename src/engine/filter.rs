use super::frequency::compute_frequencies;
use super::store::ALL_CATEGORY;
use super::types::{Article, SearchOutcome, Suggestion, SuggestionKind, TagFrequency};
use std::sync::Arc;

// ============================================================================
// Suggestion Caps
// ============================================================================

const MAX_TAG_SUGGESTIONS: usize = 3;
const MAX_CATEGORY_SUGGESTIONS: usize = 2;
const MAX_ARTICLE_SUGGESTIONS: usize = 3;

// ============================================================================
// Category and Tag Filters
// ============================================================================

/// Filter articles by category and recompute the tag table for the subset.
///
/// `"All"` short-circuits to the full set and the provided global
/// frequencies, so the caller never pays for a recount it already has.
pub fn by_category(
    articles: &[Article],
    global_tags: &[TagFrequency],
    category: &str,
) -> (Vec<Article>, Vec<TagFrequency>) {
    if category == ALL_CATEGORY {
        return (articles.to_vec(), global_tags.to_vec());
    }

    let filtered: Vec<Article> = articles
        .iter()
        .filter(|a| a.has_category(category))
        .cloned()
        .collect();
    let tags = compute_frequencies(&filtered);
    (filtered, tags)
}

/// Every article carrying `tag`, in original dataset order.
pub fn by_tag(articles: &[Article], tag: &str) -> Vec<Article> {
    articles.iter().filter(|a| a.has_tag(tag)).cloned().collect()
}

// ============================================================================
// Multi-Field Search
// ============================================================================

/// Case-insensitive substring search across title, excerpt, tags, and
/// categories, with a capped, kind-tagged suggestion list.
///
/// Suggestions are composed in a fixed order — up to 3 tag matches, up to 2
/// category matches (excluding `"All"`), up to 3 title matches — so the
/// caller can route a selection: tag -> tag filter, category -> category
/// filter, article -> narrow results to that one article.
///
/// An empty or whitespace-only term is a no-op state, not an error: empty
/// results, no suggestions.
pub fn search(
    articles: &[Article],
    all_tags: &[TagFrequency],
    categories: &[Arc<str>],
    term: &str,
) -> SearchOutcome {
    let term = term.trim();
    if term.is_empty() {
        return SearchOutcome::default();
    }
    let needle = term.to_lowercase();

    let results: Vec<Article> = articles
        .iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&needle)
                || a.excerpt.to_lowercase().contains(&needle)
                || a.tags.iter().any(|t| t.to_lowercase().contains(&needle))
                || a.categories.iter().any(|c| c.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    let mut suggestions: Vec<Suggestion> = Vec::new();

    suggestions.extend(
        all_tags
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .take(MAX_TAG_SUGGESTIONS)
            .map(|t| Suggestion {
                value: t.name.clone(),
                kind: SuggestionKind::Tag { count: t.count },
            }),
    );

    suggestions.extend(
        categories
            .iter()
            .filter(|c| &***c != ALL_CATEGORY && c.to_lowercase().contains(&needle))
            .take(MAX_CATEGORY_SUGGESTIONS)
            .map(|c| Suggestion {
                value: c.clone(),
                kind: SuggestionKind::Category,
            }),
    );

    suggestions.extend(
        articles
            .iter()
            .filter(|a| a.title.to_lowercase().contains(&needle))
            .take(MAX_ARTICLE_SUGGESTIONS)
            .map(|a| Suggestion {
                value: a.title.clone(),
                kind: SuggestionKind::Article { id: a.id.clone() },
            }),
    );

    tracing::debug!(
        term = %term,
        results = results.len(),
        suggestions = suggestions.len(),
        "Search pass"
    );

    SearchOutcome {
        results,
        suggestions,
    }
}
