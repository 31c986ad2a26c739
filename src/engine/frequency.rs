use std::collections::HashMap;
use std::sync::Arc;

use super::types::{Article, TagFrequency};

// ============================================================================
// Frequency Indexer
// ============================================================================

/// Count occurrences of each distinct tag across an article subset.
///
/// Pure: no side effects, no ordering guarantee — consumers that need a
/// stable order sort the result themselves (the layout engine sorts by
/// count descending with an alphabetical tie-break).
///
/// Used both for the global tag set at load time and for category-scoped
/// subsets on every category change.
pub fn compute_frequencies(articles: &[Article]) -> Vec<TagFrequency> {
    let mut counts: HashMap<Arc<str>, u32> = HashMap::new();
    for article in articles {
        for tag in &article.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(name, count)| TagFrequency { name, count })
        .collect()
}
