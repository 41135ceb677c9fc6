//! Search query construction.
//!
//! Turns the optional search term and date given on the command line into a
//! [`SearchQuery`], and renders that query into the form body the Boletín
//! Oficial advanced-search endpoint expects:
//!
//! ```text
//! params=<url-encoded JSON object>&array_volver=%5B%5D
//! ```

use crate::models::{SECTIONS, SearchParams, SearchQuery};
use chrono::{Local, NaiveDate};
use std::error::Error;
use tracing::{debug, instrument};

/// Search term used when none is given.
pub const DEFAULT_SEARCH_TERM: &str = "Policia Seguridad Aeroportuaria";

/// Date format the endpoint expects in `fechaDesde` / `fechaHasta`.
const WIRE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a user-supplied date.
///
/// Accepts ISO `yyyy-mm-dd` and `dd/mm/yyyy`. On failure the error from the
/// ISO attempt is returned.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|e| NaiveDate::parse_from_str(input, WIRE_DATE_FORMAT).map_err(|_| e))
}

/// Render a date the way the endpoint expects it (`dd/mm/yyyy`).
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

impl SearchQuery {
    /// Build a query from optional user input.
    ///
    /// The term defaults to [`DEFAULT_SEARCH_TERM`] and the date to today's
    /// local date. The single date is used as both ends of the range.
    ///
    /// # Errors
    ///
    /// Returns the date parse error if `date` is given and unparseable.
    #[instrument(level = "debug")]
    pub fn from_input(search: Option<&str>, date: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let date = match date {
            Some(raw) => parse_date(raw)?,
            None => Local::now().date_naive(),
        };
        Ok(Self::for_date(search.unwrap_or(DEFAULT_SEARCH_TERM), date))
    }

    /// Build a single-day query for an already parsed date.
    pub fn for_date(text: &str, date: NaiveDate) -> Self {
        Self {
            text: text.to_string(),
            date_from: date,
            date_until: date,
            page: 1,
            sections: SECTIONS,
        }
    }

    /// The JSON parameters object posted to the endpoint.
    pub fn params(&self) -> SearchParams {
        SearchParams {
            busqueda_rubro: false,
            hay_mas_resultados_busqueda: true,
            ejecutando_llamada_asincronica_busqueda: false,
            ultima_seccion: String::new(),
            filtro_por_rubros_seccion: false,
            filtro_por_rubro_busqueda: false,
            filtro_por_seccion_busqueda: false,
            busqueda_original: true,
            ordenamiento_segunda: false,
            secciones_originales: self.sections.to_vec(),
            ultimo_item_externo: None,
            ultimo_item_interno: None,
            texto: self.text.clone(),
            rubros: Vec::new(),
            nro_norma: String::new(),
            anio_norma: String::new(),
            denominacion: String::new(),
            tipo_contratacion: String::new(),
            anio_contratacion: String::new(),
            nro_contratacion: String::new(),
            fecha_desde: format_wire_date(self.date_from),
            fecha_hasta: format_wire_date(self.date_until),
            todas_las_palabras: true,
            comienza_denominacion: true,
            seccion: self.sections.to_vec(),
            tipo_busqueda: "Avanzada".to_string(),
            numero_pagina: self.page,
            ultimo_rubro: String::new(),
        }
    }

    /// Form-url-encoded request body.
    pub fn form_body(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(&self.params())?;
        debug!(params = %json, "Built search params");
        Ok(format!(
            "params={}&array_volver={}",
            urlencoding::encode(&json),
            urlencoding::encode("[]")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn params_json(query: &SearchQuery) -> Value {
        serde_json::to_value(query.params()).unwrap()
    }

    #[test]
    fn test_defaults_to_fixed_term() {
        let query = SearchQuery::from_input(None, Some("2024-03-05")).unwrap();
        assert_eq!(query.text, DEFAULT_SEARCH_TERM);
        assert_eq!(query.page, 1);
        assert_eq!(query.sections, [1, 2, 3]);
    }

    #[test]
    fn test_defaults_to_today() {
        let query = SearchQuery::from_input(Some("decreto"), None).unwrap();
        let today = Local::now().date_naive();
        // Guard against running exactly across midnight.
        assert!(query.date_from == today || query.date_from == today.pred_opt().unwrap());
        assert_eq!(query.date_from, query.date_until);
    }

    #[test]
    fn test_wire_dates_from_iso_input() {
        let query = SearchQuery::from_input(Some("decreto"), Some("2024-03-05")).unwrap();
        let json = params_json(&query);
        assert_eq!(json["fechaDesde"], "05/03/2024");
        assert_eq!(json["fechaHasta"], "05/03/2024");
    }

    #[test]
    fn test_wire_dates_from_slash_input() {
        let query = SearchQuery::from_input(Some("decreto"), Some("05/03/2024")).unwrap();
        let json = params_json(&query);
        assert_eq!(json["fechaDesde"], "05/03/2024");
        assert_eq!(json["fechaHasta"], "05/03/2024");
    }

    #[test]
    fn test_invalid_date_fails() {
        assert!(SearchQuery::from_input(None, Some("2024-13-40")).is_err());
        assert!(SearchQuery::from_input(None, Some("yesterday")).is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_params_schema() {
        let query = SearchQuery::from_input(Some("Resolución"), Some("2020-07-31")).unwrap();
        let json = params_json(&query);

        assert_eq!(json["texto"], "Resolución");
        assert_eq!(json["tipoBusqueda"], "Avanzada");
        assert_eq!(json["numeroPagina"], 1);
        assert_eq!(json["seccion"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["seccionesOriginales"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["ultimoItemExterno"], Value::Null);
        assert_eq!(json["busquedaOriginal"], true);
        assert_eq!(json["todasLasPalabras"], true);
        assert_eq!(json["rubros"], serde_json::json!([]));
        assert_eq!(json.as_object().unwrap().len(), 28);
    }

    #[test]
    fn test_params_field_order() {
        let query = SearchQuery::for_date("x", NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        let json = serde_json::to_string(&query.params()).unwrap();
        assert!(json.starts_with(r#"{"busquedaRubro":false,"hayMasResultadosBusqueda":true"#));
        assert!(json.ends_with(r#""numeroPagina":1,"ultimoRubro":""}"#));
    }

    #[test]
    fn test_form_body_is_url_encoded() {
        let query = SearchQuery::for_date(
            "Policia Seguridad",
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        );
        let body = query.form_body().unwrap();

        assert!(body.starts_with("params=%7B"));
        assert!(body.ends_with("&array_volver=%5B%5D"));
        assert!(!body.contains(' '));

        let encoded = body
            .strip_prefix("params=")
            .and_then(|rest| rest.strip_suffix("&array_volver=%5B%5D"))
            .unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        let json: Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(json["texto"], "Policia Seguridad");
        assert_eq!(json["fechaDesde"], "02/01/2020");
    }
}
