use std::collections::HashMap;

use crate::engine::{DataError, RawRow};

/// The reference datasets use `^` — article excerpts are prose, so a comma
/// delimiter would need quoting the format does not have.
pub const DEFAULT_DELIMITER: char = '^';

/// Column names the parser understands. `title`, `excerpt`, `url`,
/// `categories`, and `tags` are required in the header; `id` and
/// `picture_link` are optional. Unknown columns are ignored.
const REQUIRED_COLUMNS: [&str; 5] = ["title", "excerpt", "url", "categories", "tags"];

// ============================================================================
// Delimited Table Parser
// ============================================================================

/// Parse a delimited text table into raw rows.
///
/// The first non-empty line is the header and is required; a header missing
/// a required column fails the whole parse with
/// [`DataError::TransportFailure`]. Body rows with a field count that does
/// not match the header are skipped with a warning, as are empty lines —
/// one bad row never sinks the dataset.
pub fn parse_table(text: &str, delimiter: char) -> Result<Vec<RawRow>, DataError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines
        .next()
        .ok_or_else(|| DataError::TransportFailure("dataset is empty".to_string()))?;
    let columns = parse_header(header_line, delimiter)?;

    let mut rows = Vec::new();
    for (number, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != columns.width {
            tracing::warn!(
                row = number,
                expected = columns.width,
                found = fields.len(),
                "Skipping row with wrong field count"
            );
            continue;
        }

        rows.push(RawRow {
            id: columns.get(&fields, "id"),
            title: columns.get(&fields, "title").unwrap_or_default(),
            excerpt: columns.get(&fields, "excerpt").unwrap_or_default(),
            url: columns.get(&fields, "url").unwrap_or_default(),
            picture_link: columns.get(&fields, "picture_link"),
            categories: columns.get(&fields, "categories").unwrap_or_default(),
            tags: columns.get(&fields, "tags").unwrap_or_default(),
        });
    }

    tracing::debug!(rows = rows.len(), "Parsed dataset table");
    Ok(rows)
}

/// Header column positions, by name.
struct Columns {
    index: HashMap<String, usize>,
    width: usize,
}

impl Columns {
    fn get(&self, fields: &[&str], name: &str) -> Option<String> {
        self.index
            .get(name)
            .and_then(|&i| fields.get(i))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

fn parse_header(line: &str, delimiter: char) -> Result<Columns, DataError> {
    let mut index = HashMap::new();
    let mut width = 0;
    for (position, name) in line.split(delimiter).enumerate() {
        index.insert(name.trim().to_lowercase(), position);
        width = position + 1;
    }

    for required in REQUIRED_COLUMNS {
        if !index.contains_key(required) {
            return Err(DataError::TransportFailure(format!(
                "dataset header is missing required column '{}'",
                required
            )));
        }
    }

    Ok(Columns { index, width })
}
