use std::collections::HashSet;

use crate::parser::cells::strip_quotes;

/// Normalize a raw header for case-insensitive matching.
///
/// Trims whitespace, removes surrounding quotes, collapses internal whitespace
/// runs, lowercases the result and replaces spaces with underscores.
///
/// Examples:
/// - `" Primary Table "` -> `"primary_table"`
/// - `"\"SQL Table\""` -> `"sql_table"`
/// - `"sql_table"` -> `"sql_table"`
pub fn normalize_header(raw: &str) -> String {
    strip_quotes(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Lowercase a sheet or file name for keyword matching.
pub fn normalize_sheet_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Suffix repeated headers with `_2`, `_3`, ... in first-seen order.
///
/// A generated name never reuses a name that was already emitted, so the
/// output is always a set of unique names.
pub fn dedupe_headers<I, S>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut deduped = Vec::with_capacity(headers.len());

    for header in headers {
        if taken.insert(header.clone()) {
            deduped.push(header);
            continue;
        }
        let mut suffix = 2usize;
        let candidate = loop {
            let candidate = format!("{header}_{suffix}");
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        taken.insert(candidate.clone());
        deduped.push(candidate);
    }

    deduped
}

/// Placeholder name for a column whose header cell is blank (1-based index).
pub fn placeholder_header(index: usize) -> String {
    format!("column_{}", index + 1)
}
