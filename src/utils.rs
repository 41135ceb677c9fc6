//! Small text helpers shared by the extractor, transport and logging.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use url::Url;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize scraped display text.
///
/// Non-breaking spaces become regular spaces, runs of whitespace collapse to
/// a single space, and the result is trimmed.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  Resolución\u{a0}123 \n"), "Resolución 123");
/// ```
pub fn clean_text(text: &str) -> String {
    let text = text.replace('\u{a0}', " ");
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Parse a site base URL that must be a bare origin.
///
/// Endpoint paths and article hrefs are absolute paths, so joining them would
/// silently drop any path, query or fragment on the base. Those are rejected
/// instead; a single trailing `/` is fine.
pub fn parse_origin(base_url: &str) -> Result<Url, Box<dyn Error>> {
    let url = Url::parse(base_url)?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(format!("base URL {base_url:?} has no host").into());
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(format!("base URL {base_url:?} must be a bare origin such as https://host").into());
    }
    Ok(url)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary before `max` bytes and
/// get `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_replaces_nbsp() {
        assert_eq!(clean_text("Resolución\u{a0}123"), "Resolución 123");
    }

    #[test]
    fn test_clean_text_trims_and_collapses() {
        assert_eq!(clean_text("\n   Resolución  123\t "), "Resolución 123");
        assert_eq!(clean_text("Decreto\u{a0}\u{a0} 45/2024"), "Decreto 45/2024");
    }

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \u{a0} "), "");
    }

    #[test]
    fn test_parse_origin_accepts_bare_origins() {
        assert!(parse_origin("https://www.boletinoficial.gob.ar").is_ok());
        assert!(parse_origin("https://www.boletinoficial.gob.ar/").is_ok());
        assert!(parse_origin("http://127.0.0.1:8080").is_ok());
    }

    #[test]
    fn test_parse_origin_rejects_paths_and_extras() {
        assert!(parse_origin("https://host/prefix").is_err());
        assert!(parse_origin("https://host/?q=1").is_err());
        assert!(parse_origin("https://host/#top").is_err());
        assert!(parse_origin("mailto:someone@example.com").is_err());
        assert!(parse_origin("boletinoficial").is_err());
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_boundary() {
        let result = truncate_for_log("Resolución", 8);
        assert_eq!(result, "Resoluci…(+3 bytes)");
        // "ó" is two bytes; cutting at 2 would split it.
        assert_eq!(truncate_for_log("aóc", 2), "a…(+3 bytes)");
    }
}
