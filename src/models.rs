//! Data models for bulletin searches and their results.
//!
//! - [`SearchQuery`]: what the user asked for (term and date range)
//! - [`SearchParams`]: the JSON object the search endpoint expects
//! - [`SearchResponse`]: the decoded JSON envelope returned by the endpoint
//! - [`ArticleRecord`]: one extracted article (title and absolute link)
//!
//! The wire models use camelCase field names to match the endpoint's schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Section filters applied to every search (primera, segunda, tercera).
pub const SECTIONS: [u8; 3] = [1, 2, 3];

/// A search request built from user input.
///
/// Built once by `SearchQuery::from_input` and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text term, sent as-is in `texto`.
    pub text: String,
    /// First day of the publication range.
    pub date_from: NaiveDate,
    /// Last day of the publication range.
    pub date_until: NaiveDate,
    /// Result page, always 1 since pagination is not traversed.
    pub page: u32,
    /// Section filters.
    pub sections: [u8; 3],
}

/// The JSON object posted in the `params` form field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub busqueda_rubro: bool,
    pub hay_mas_resultados_busqueda: bool,
    pub ejecutando_llamada_asincronica_busqueda: bool,
    pub ultima_seccion: String,
    pub filtro_por_rubros_seccion: bool,
    pub filtro_por_rubro_busqueda: bool,
    pub filtro_por_seccion_busqueda: bool,
    pub busqueda_original: bool,
    pub ordenamiento_segunda: bool,
    pub secciones_originales: Vec<u8>,
    pub ultimo_item_externo: Option<String>,
    pub ultimo_item_interno: Option<String>,
    pub texto: String,
    pub rubros: Vec<String>,
    pub nro_norma: String,
    pub anio_norma: String,
    pub denominacion: String,
    pub tipo_contratacion: String,
    pub anio_contratacion: String,
    pub nro_contratacion: String,
    /// Start of range, `dd/mm/yyyy`.
    pub fecha_desde: String,
    /// End of range, `dd/mm/yyyy`.
    pub fecha_hasta: String,
    pub todas_las_palabras: bool,
    pub comienza_denominacion: bool,
    pub seccion: Vec<u8>,
    pub tipo_busqueda: String,
    pub numero_pagina: u32,
    pub ultimo_rubro: String,
}

/// Result count as reported by the endpoint.
///
/// The endpoint reports either a single number or one number per section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ResultCount {
    Total(u64),
    PerSection(BTreeMap<String, u64>),
}

impl ResultCount {
    /// Total number of results across all sections.
    pub fn total(&self) -> u64 {
        match self {
            ResultCount::Total(n) => *n,
            ResultCount::PerSection(map) => map.values().sum(),
        }
    }
}

/// Raw JSON envelope: `{"content": {"html": "...", "cantidad_result_seccion": ...}}`.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    pub content: SearchContent,
}

#[derive(Debug, Deserialize)]
pub struct SearchContent {
    pub html: String,
    pub cantidad_result_seccion: ResultCount,
}

/// A decoded search response. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// HTTP status of the response.
    pub status: u16,
    /// HTML fragment listing the matching articles.
    pub html: String,
    /// Result count reported alongside the fragment.
    pub result_count: ResultCount,
}

impl SearchResponse {
    pub fn from_envelope(status: u16, envelope: SearchEnvelope) -> Self {
        Self {
            status,
            html: envelope.content.html,
            result_count: envelope.content.cantidad_result_seccion,
        }
    }
}

/// One article found in the search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    /// Display title, whitespace-normalized.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
}
