//! Boletín Oficial search-result scraper.
//!
//! The advanced-search endpoint returns an HTML fragment where each article
//! is a `<p class="item">` nested inside the anchor that links to it:
//!
//! ```html
//! <a href="/detalleAviso/primera/123456/20240305">
//!   <div class="linea-aviso"><p class="item">Resolución 123/2024</p></div>
//! </a>
//! ```
//!
//! Relative hrefs are resolved against the site origin, giving URLs like
//! `https://www.boletinoficial.gob.ar/detalleAviso/primera/123456/20240305`.
//! Links that resolve to any other origin are rejected.

use super::ArticleExtractor;
use crate::models::ArticleRecord;
use crate::utils::{clean_text, parse_origin};
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Site origin used to resolve article links.
pub const BASE_URL: &str = "https://www.boletinoficial.gob.ar";

/// Selector for result items in the Boletín Oficial markup.
pub const ITEM_SELECTOR: &str = "p.item";

/// Extracts items matching a CSS selector and links from their enclosing anchors.
#[derive(Debug, Clone)]
pub struct HtmlItemExtractor {
    base_url: Url,
    item_selector: Selector,
}

impl HtmlItemExtractor {
    /// Build an extractor for an arbitrary item selector.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not a bare origin (see [`parse_origin`]) or
    /// `item_selector` is not valid CSS.
    pub fn new(base_url: &str, item_selector: &str) -> Result<Self, Box<dyn Error>> {
        let base_url = parse_origin(base_url)?;
        let item_selector = Selector::parse(item_selector)
            .map_err(|e| format!("invalid item selector {item_selector:?}: {e}"))?;
        Ok(Self {
            base_url,
            item_selector,
        })
    }

    /// Extractor for the Boletín Oficial markup, resolving links against `base_url`.
    pub fn boletin(base_url: &str) -> Result<Self, Box<dyn Error>> {
        Self::new(base_url, ITEM_SELECTOR)
    }

    fn record_for(&self, item: ElementRef<'_>) -> Result<ArticleRecord, Box<dyn Error>> {
        let title = clean_text(&item.text().collect::<String>());

        let anchor = item
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "a")
            .ok_or_else(|| format!("result item {title:?} has no enclosing link"))?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| format!("link for result item {title:?} has no href"))?;
        let link = self.base_url.join(href.trim())?;
        if link.origin() != self.base_url.origin() {
            return Err(format!(
                "link {link} for result item {title:?} is outside {}",
                self.base_url.origin().ascii_serialization()
            )
            .into());
        }
        if title.is_empty() {
            warn!(%link, "Result item has no title");
        }

        Ok(ArticleRecord {
            title,
            link: link.to_string(),
        })
    }
}

impl ArticleExtractor for HtmlItemExtractor {
    #[instrument(level = "info", skip_all, fields(bytes = html.len()))]
    fn extract(&self, html: &str) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
        let fragment = Html::parse_fragment(html);

        let records = fragment
            .select(&self.item_selector)
            .map(|item| self.record_for(item))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = records.len(), "Extracted result items");
        debug!(records = ?records, "Extracted records");
        Ok(records)
    }
}
