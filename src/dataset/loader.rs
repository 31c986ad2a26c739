use std::path::Path;

use super::parser::parse_table;
use crate::engine::{DataError, RecordStore};

/// Maximum dataset size (8 MB). A dataset beyond this is almost certainly
/// the wrong file, and refusing it early protects against memory exhaustion.
const MAX_DATASET_SIZE: u64 = 8 * 1024 * 1024;

// ============================================================================
// Dataset Loader
// ============================================================================

/// Read and parse a dataset file into a populated [`RecordStore`].
///
/// - read failure or oversized file -> [`DataError::TransportFailure`]
///   (the caller keeps its empty store; derived queries return empty
///   collections rather than erroring);
/// - zero valid articles after row validation -> [`DataError::EmptyDataset`]
///   so the caller can tell a valid-but-empty channel from a populated one.
///
/// Load is fire-and-forget with no in-flight deduplication; guarding against
/// concurrent second loads is the caller's concern.
pub async fn load_dataset(path: &Path, delimiter: char) -> Result<RecordStore, DataError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.len() > MAX_DATASET_SIZE => {
            return Err(DataError::TransportFailure(format!(
                "dataset '{}' is {} bytes (max {})",
                path.display(),
                meta.len(),
                MAX_DATASET_SIZE
            )));
        }
        Err(e) => {
            return Err(DataError::TransportFailure(format!(
                "cannot stat '{}': {}",
                path.display(),
                e
            )));
        }
        Ok(_) => {}
    }

    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        DataError::TransportFailure(format!("cannot read '{}': {}", path.display(), e))
    })?;

    let rows = parse_table(&text, delimiter)?;
    let store = RecordStore::load(rows)?;

    if store.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    tracing::info!(
        path = %path.display(),
        articles = store.articles().len(),
        "Dataset loaded"
    );
    Ok(store)
}
