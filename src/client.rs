//! HTTP transport for the Boletín Oficial advanced-search endpoint.
//!
//! One POST per search, no retries and no timeout: any failure (connection,
//! non-2xx status, malformed JSON, missing keys) is returned to the caller and
//! ends the run.

use crate::models::{SearchEnvelope, SearchQuery, SearchResponse};
use crate::utils::{parse_origin, truncate_for_log};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info, instrument};
use url::Url;

/// Path of the search endpoint, relative to the site origin.
pub const SEARCH_PATH: &str = "/busquedaAvanzada/realizarBusqueda";

/// Browser-like user agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/84.0.4147.89 Safari/537.36";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Client for the search endpoint.
#[derive(Debug, Clone)]
pub struct BulletinClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl BulletinClient {
    /// Create a client for the site at `base_url`.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not a bare origin (see [`parse_origin`]) or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, Box<dyn Error>> {
        let endpoint = parse_origin(base_url)?.join(SEARCH_PATH)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run a search and decode the response envelope.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-2xx status, a body that is
    /// not JSON, or JSON missing `content.html` / `content.cantidad_result_seccion`.
    #[instrument(level = "info", skip_all, fields(text = %query.text, date = %query.date_from))]
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, Box<dyn Error>> {
        let body = query.form_body()?;
        let t0 = Instant::now();

        let response = self
            .http
            .post(self.endpoint.clone())
            .body(body)
            .send()
            .await?
            .error_for_status()?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(body = %truncate_for_log(&text, 300), "Search response body");
        let envelope: SearchEnvelope = serde_json::from_str(&text)?;
        let response = SearchResponse::from_envelope(status, envelope);

        info!(
            status,
            results = response.result_count.total(),
            html_bytes = response.html.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Search completed"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query() -> SearchQuery {
        SearchQuery::for_date(
            "Policia Seguridad Aeroportuaria",
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        )
    }

    #[test]
    fn test_endpoint_is_joined_to_base() {
        let client = BulletinClient::new("https://www.boletinoficial.gob.ar").unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://www.boletinoficial.gob.ar/busquedaAvanzada/realizarBusqueda"
        );
    }

    #[test]
    fn test_invalid_base_url_fails() {
        assert!(BulletinClient::new("boletinoficial").is_err());
        assert!(BulletinClient::new("https://www.boletinoficial.gob.ar/prefix").is_err());
    }

    #[tokio::test]
    async fn test_search_posts_form_and_decodes_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .and(header("content-type", FORM_CONTENT_TYPE))
            .and(header_regex("user-agent", "^Mozilla/5.0 "))
            .and(body_string_contains("params=%7B"))
            .and(body_string_contains("05%2F03%2F2024"))
            .and(body_string_contains("&array_volver=%5B%5D"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": {
                    "html": "<a href=\"/detalle/1\"><p class=\"item\">Resolución 1</p></a>",
                    "cantidad_result_seccion": 1
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BulletinClient::new(&server.uri()).unwrap();
        let response = client.search(&query()).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.html.contains("Resolución 1"));
        assert_eq!(response.result_count.total(), 1);
    }

    #[tokio::test]
    async fn test_search_non_2xx_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = BulletinClient::new(&server.uri()).unwrap();
        assert!(client.search(&query()).await.is_err());
    }

    #[tokio::test]
    async fn test_search_malformed_json_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = BulletinClient::new(&server.uri()).unwrap();
        assert!(client.search(&query()).await.is_err());
    }

    #[tokio::test]
    async fn test_search_missing_keys_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": {}})))
            .mount(&server)
            .await;

        let client = BulletinClient::new(&server.uri()).unwrap();
        assert!(client.search(&query()).await.is_err());
    }
}
