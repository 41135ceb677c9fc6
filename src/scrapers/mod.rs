//! Article extraction from search-result HTML.
//!
//! The selector logic is tied to one site's markup, so it sits behind the
//! narrow [`ArticleExtractor`] trait. The pipeline only ever asks for
//! "records from this fragment"; tests and alternative markups plug in their
//! own implementation.
//!
//! # Implementations
//!
//! | Source | Module | Items | Links |
//! |--------|--------|-------|-------|
//! | Boletín Oficial | [`boletin`] | `p.item` | href of the enclosing `<a>` |

use crate::models::ArticleRecord;
use std::error::Error;

pub mod boletin;

pub use boletin::HtmlItemExtractor;

/// Extract article records from an HTML fragment.
pub trait ArticleExtractor {
    /// Return one record per result item, in document order.
    ///
    /// An empty fragment yields an empty vector. Markup that does not match
    /// the expected structure is an error.
    fn extract(&self, html: &str) -> Result<Vec<ArticleRecord>, Box<dyn Error>>;
}
