//! Plain-text rendering of extracted records.

use crate::models::{ArticleRecord, SearchQuery};
use itertools::Itertools;

/// Render records as concatenated `"Title: <title>\nLink: <url>\n"` blocks.
///
/// An empty slice renders as an empty string.
pub fn format_records(records: &[ArticleRecord]) -> String {
    records
        .iter()
        .map(|r| format!("Title: {}\nLink: {}\n", r.title, r.link))
        .join("")
}

/// Email subject line for a query: `Boletín Oficial: <term> (<yyyy-mm-dd>)`.
pub fn subject_for(query: &SearchQuery) -> String {
    format!("Boletín Oficial: {} ({})", query.text, query.date_from)
}
