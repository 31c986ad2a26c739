//! Persisted search history, used only to rank "popular searches".
//!
//! The store is a `{term -> count}` map behind the [`HistoryStore`] trait so
//! the browser facade can be tested with an in-memory fake. Persistence
//! failures are deliberately soft: corruption resets the history to empty
//! and a failed write is logged and dropped — popular searches are a
//! convenience, never required for the correctness of filtering or search.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Popular-searches ranking depth used by the browser facade.
pub const POPULAR_LIMIT: usize = 5;

// ============================================================================
// History Store Trait
// ============================================================================

/// Key-value search-history counter, injected into the browser facade
/// instead of living as ambient global state.
pub trait HistoryStore {
    /// Count one use of `term`. Blank terms are ignored.
    fn record(&mut self, term: &str);

    /// The top `limit` terms by count, descending, with an alphabetical
    /// tie-break for determinism.
    fn popular(&self, limit: usize) -> Vec<String>;
}

/// Shared ranking over a counts map.
fn rank(counts: &HashMap<String, u32>, limit: usize) -> Vec<String> {
    let mut entries: Vec<(&String, &u32)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries.into_iter().take(limit).map(|(term, _)| term.clone()).collect()
}

// ============================================================================
// In-Memory Store
// ============================================================================

/// Non-persistent store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    counts: HashMap<String, u32>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn record(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        *self.counts.entry(term.to_string()).or_insert(0) += 1;
    }

    fn popular(&self, limit: usize) -> Vec<String> {
        rank(&self.counts, limit)
    }
}

// ============================================================================
// JSON File Store
// ============================================================================

/// File-backed store persisting the counts map as a JSON object.
///
/// An unreadable or unparseable file is treated as an empty history, never
/// an error — the next recorded search starts the file over.
#[derive(Debug)]
pub struct JsonHistoryStore {
    path: PathBuf,
    counts: HashMap<String, u32>,
}

impl JsonHistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let counts = Self::read_counts(&path);
        Self { path, counts }
    }

    fn read_counts(path: &Path) -> HashMap<String, u32> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read search history");
                return HashMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Corrupt search history, resetting to empty"
                );
                HashMap::new()
            }
        }
    }

    /// Write-to-temp-then-rename so the history file is never left in a
    /// partial state. Failures are logged and dropped.
    fn save(&self) {
        let json = match serde_json::to_string(&self.counts) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize search history");
                return;
            }
        };

        let temp_path = self.path.with_extension("tmp");
        let result = std::fs::File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(json.as_bytes())?;
                file.sync_all()
            })
            .and_then(|_| std::fs::rename(&temp_path, &self.path));

        if let Err(e) = result {
            let _ = std::fs::remove_file(&temp_path);
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist search history");
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn record(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        *self.counts.entry(term.to_string()).or_insert(0) += 1;
        self.save();
    }

    fn popular(&self, limit: usize) -> Vec<String> {
        rank(&self.counts, limit)
    }
}
