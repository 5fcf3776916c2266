//! Request builder and response parser for the Pagecraft public API.
//!
//! # Design
//! `PagecraftClient` holds only its validated `ApiConfig`. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`; the matching `get_*`
//! method runs both around a `Transport`. One call is one GET request.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Category, Menu, PageDetail, PagesQuery, PagesResponse};

const PARAM_CATEGORY_SLUG: &str = "filter.category.slug";
const PARAM_START: &str = "start";
const PARAM_OFFSET: &str = "offset";
const PARAM_VERSION: &str = "v";

#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<Category>,
}

/// Client for one Pagecraft project.
#[derive(Debug, Clone)]
pub struct PagecraftClient {
    config: ApiConfig,
}

impl PagecraftClient {
    /// Fails before any I/O when the token or the project id is missing.
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    pub fn build_get_categories(&self) -> HttpRequest {
        self.request(None, Vec::new())
    }

    pub fn build_get_pages(&self, query: &PagesQuery) -> HttpRequest {
        let mut params = Vec::new();
        if let Some(filters) = &query.filters {
            params.push((PARAM_CATEGORY_SLUG.to_string(), filters.category.slug.clone()));
        }
        if let Some(start) = query.start {
            params.push((PARAM_START.to_string(), start.to_string()));
        }
        if let Some(offset) = query.offset {
            params.push((PARAM_OFFSET.to_string(), offset.to_string()));
        }
        self.request(Some("pages".to_string()), params)
    }

    pub fn build_get_page_by_slug(&self, slug: &str, version: Option<&str>) -> HttpRequest {
        let params = version
            .map(|v| vec![(PARAM_VERSION.to_string(), v.to_string())])
            .unwrap_or_default();
        self.request(Some(format!("pages/{}", urlencoding::encode(slug))), params)
    }

    pub fn build_get_menu_by_id(&self, id: &str) -> HttpRequest {
        self.request(Some(format!("menus/{}", urlencoding::encode(id))), Vec::new())
    }

    // -----------------------------------------------------------------------
    // Parsers
    // -----------------------------------------------------------------------

    /// Unwraps the `categories` field of the response body.
    pub fn parse_get_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        let envelope: CategoriesEnvelope = decode(response)?;
        Ok(envelope.categories)
    }

    pub fn parse_get_pages(&self, response: HttpResponse) -> Result<PagesResponse, ApiError> {
        decode(response)
    }

    pub fn parse_get_page_by_slug(&self, response: HttpResponse) -> Result<PageDetail, ApiError> {
        decode(response)
    }

    pub fn parse_get_menu_by_id(&self, response: HttpResponse) -> Result<Menu, ApiError> {
        decode(response)
    }

    // -----------------------------------------------------------------------
    // Round-trips
    //
    // Each blocks the calling thread for one request. From async code, run
    // them under `spawn_blocking`, or drive `build_*`/`parse_*` with the
    // host's own HTTP client.
    // -----------------------------------------------------------------------

    /// Blocking; see `build_get_categories` for the request.
    pub fn get_categories<T: Transport>(&self, transport: &T) -> Result<Vec<Category>, ApiError> {
        let response = send(transport, self.build_get_categories())?;
        self.parse_get_categories(response)
    }

    /// Blocking; see `build_get_pages` for the request.
    pub fn get_pages<T: Transport>(
        &self,
        transport: &T,
        query: &PagesQuery,
    ) -> Result<PagesResponse, ApiError> {
        let response = send(transport, self.build_get_pages(query))?;
        self.parse_get_pages(response)
    }

    /// Blocking; see `build_get_page_by_slug` for the request.
    pub fn get_page_by_slug<T: Transport>(
        &self,
        transport: &T,
        slug: &str,
        version: Option<&str>,
    ) -> Result<PageDetail, ApiError> {
        let response = send(transport, self.build_get_page_by_slug(slug, version))?;
        self.parse_get_page_by_slug(response)
    }

    /// Blocking; see `build_get_menu_by_id` for the request.
    pub fn get_menu_by_id<T: Transport>(&self, transport: &T, id: &str) -> Result<Menu, ApiError> {
        let response = send(transport, self.build_get_menu_by_id(id))?;
        self.parse_get_menu_by_id(response)
    }

    /// `{base}/{projectId}[/{endpoint}]` with the auth headers attached.
    fn request(&self, endpoint: Option<String>, query: Vec<(String, String)>) -> HttpRequest {
        let root = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.config.project_id)
        );
        let path = match endpoint {
            Some(endpoint) => format!("{root}/{endpoint}"),
            None => root,
        };
        log::debug!("built GET {path} with {} query params", query.len());
        HttpRequest {
            method: HttpMethod::Get,
            path,
            query,
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.api_token),
                ),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        }
    }
}

/// Execute `request`, turning a connection failure into a status-0 request error.
fn send<T: Transport>(transport: &T, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    transport.execute(&request).map_err(|e| {
        log::warn!("GET {} failed before a response: {e}", request.path);
        ApiError::Request {
            status: 0,
            message: e.to_string(),
            body: String::new(),
        }
    })
}

/// Map any non-2xx status to `ApiError::Request`, then decode the body.
fn decode<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = ::http::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
        .to_string();
    log::warn!("request failed with status {}: {message}", response.status);
    Err(ApiError::Request {
        status: response.status,
        message,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use crate::types::PageFilters;

    const BASE: &str = "https://api.pagecraft.co/public";

    fn client() -> PagecraftClient {
        PagecraftClient::new(ApiConfig::new("secret-token", "proj-1")).unwrap()
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn not_found() -> HttpResponse {
        HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"error":"missing"}"#.to_string(),
        }
    }

    /// Answers every request with a fixed response and records what it saw.
    struct StubTransport {
        response: Result<HttpResponse, TransportError>,
        seen: std::cell::RefCell<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn new(response: Result<HttpResponse, TransportError>) -> Self {
            Self {
                response,
                seen: std::cell::RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.borrow_mut().push(request.clone());
            self.response.clone()
        }
    }

    #[test]
    fn new_rejects_missing_token() {
        let err = PagecraftClient::new(ApiConfig::new("", "proj-1")).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiToken);
    }

    #[test]
    fn new_rejects_missing_project_id() {
        let err = PagecraftClient::new(ApiConfig::new("secret-token", "")).unwrap_err();
        assert_eq!(err, ConfigError::MissingProjectId);
    }

    #[test]
    fn every_request_carries_bearer_token() {
        let c = client();
        let requests = [
            c.build_get_categories(),
            c.build_get_pages(&PagesQuery::default()),
            c.build_get_page_by_slug("about-us", None),
            c.build_get_menu_by_id("main"),
        ];
        for req in requests {
            assert_eq!(req.method, HttpMethod::Get);
            assert_eq!(req.header("Authorization"), Some("Bearer secret-token"));
        }
    }

    #[test]
    fn build_get_categories_targets_project_root() {
        let req = client().build_get_categories();
        assert_eq!(req.path, format!("{BASE}/proj-1"));
        assert!(req.query.is_empty());
    }

    #[test]
    fn build_get_pages_includes_only_given_params() {
        let query = PagesQuery {
            filters: Some(PageFilters::category("blog")),
            start: Some(10),
            offset: Some(5),
        };
        let req = client().build_get_pages(&query);
        assert_eq!(req.path, format!("{BASE}/proj-1/pages"));
        assert_eq!(
            req.url(),
            format!("{BASE}/proj-1/pages?filter.category.slug=blog&start=10&offset=5")
        );

        let bare = client().build_get_pages(&PagesQuery::default());
        assert!(bare.query.is_empty());

        let start_only = client().build_get_pages(&PagesQuery {
            start: Some(0),
            ..PagesQuery::default()
        });
        assert_eq!(start_only.query, vec![("start".to_string(), "0".to_string())]);
    }

    #[test]
    fn build_get_page_by_slug_adds_version_only_when_given() {
        let req = client().build_get_page_by_slug("about-us", None);
        assert_eq!(req.path, format!("{BASE}/proj-1/pages/about-us"));
        assert_eq!(req.query_param("v"), None);

        let draft = client().build_get_page_by_slug("about-us", Some("draft"));
        assert_eq!(draft.query_param("v"), Some("draft"));
        assert_eq!(draft.url(), format!("{BASE}/proj-1/pages/about-us?v=draft"));
    }

    #[test]
    fn build_get_menu_by_id_targets_menus() {
        let req = client().build_get_menu_by_id("main");
        assert_eq!(req.path, format!("{BASE}/proj-1/menus/main"));
    }

    #[test]
    fn path_segments_are_encoded() {
        let req = client().build_get_page_by_slug("a/b c", None);
        assert_eq!(req.path, format!("{BASE}/proj-1/pages/a%2Fb%20c"));
    }

    #[test]
    fn custom_base_url_is_used() {
        let config = ApiConfig::new("t", "p").with_base_url("http://localhost:3000/public/");
        let c = PagecraftClient::new(config).unwrap();
        assert_eq!(c.build_get_categories().path, "http://localhost:3000/public/p");
    }

    #[test]
    fn trailing_slash_on_base_url_field_is_ignored() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/public//".to_string(),
            ..ApiConfig::new("t", "p")
        };
        let c = PagecraftClient::new(config).unwrap();
        assert_eq!(c.build_get_categories().path, "http://localhost:3000/public/p");
        assert_eq!(
            c.build_get_menu_by_id("main").path,
            "http://localhost:3000/public/p/menus/main"
        );
    }

    #[test]
    fn parse_get_categories_unwraps_in_order() {
        let body = r#"{"categories":[{"name":"Blog","slug":"blog"},{"name":"News","slug":"news"}]}"#;
        let categories = client().parse_get_categories(ok(body)).unwrap();
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["blog", "news"]);
    }

    #[test]
    fn parse_get_pages_keeps_total() {
        let body = r#"{"items":[{"title":"One","slug":"one","categories":[]}],"total":42}"#;
        let pages = client().parse_get_pages(ok(body)).unwrap();
        assert_eq!(pages.items.len(), 1);
        assert_eq!(pages.total, 42);
    }

    #[test]
    fn parse_get_menu_by_id_success() {
        let body = r#"{"id":"main","name":"Main","items":[{"title":"Home","icon":"home","url":"/","styles":[],"children":[]}]}"#;
        let menu = client().parse_get_menu_by_id(ok(body)).unwrap();
        assert_eq!(menu.name, "Main");
        assert_eq!(menu.items[0].url, "/");
    }

    #[test]
    fn not_found_message_has_status_and_reason_for_every_parser() {
        let c = client();
        let errors = [
            c.parse_get_categories(not_found()).unwrap_err(),
            c.parse_get_pages(not_found()).unwrap_err(),
            c.parse_get_page_by_slug(not_found()).unwrap_err(),
            c.parse_get_menu_by_id(not_found()).unwrap_err(),
        ];
        for err in errors {
            let msg = err.to_string();
            assert!(msg.contains("404"), "{msg}");
            assert!(msg.contains("Not Found"), "{msg}");
            assert_eq!(err.status(), Some(404));
        }
    }

    #[test]
    fn server_errors_are_not_classified_differently() {
        let response = HttpResponse {
            status: 503,
            headers: Vec::new(),
            body: "down".to_string(),
        };
        let err = client().parse_get_categories(response).unwrap_err();
        assert!(matches!(err, ApiError::Request { status: 503, ref body, .. } if body == "down"));
        assert_eq!(err.to_string(), "Pagecraft API error 503: Service Unavailable");
    }

    #[test]
    fn bad_json_is_a_deserialization_error() {
        let err = client().parse_get_pages(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn get_categories_runs_through_transport() {
        let transport = StubTransport::new(Ok(ok(r#"{"categories":[{"name":"Blog","slug":"blog"}]}"#)));
        let categories = client().get_categories(&transport).unwrap();
        assert_eq!(categories[0].name, "Blog");
        let seen = transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, format!("{BASE}/proj-1"));
    }

    #[test]
    fn repeated_calls_issue_repeated_requests() {
        let transport = StubTransport::new(Ok(ok(r#"{"categories":[]}"#)));
        let c = client();
        c.get_categories(&transport).unwrap();
        c.get_categories(&transport).unwrap();
        assert_eq!(transport.seen.borrow().len(), 2);
    }

    #[test]
    fn transport_failure_maps_to_status_zero() {
        let transport = StubTransport::new(Err(TransportError("connection refused".to_string())));
        let err = client().get_menu_by_id(&transport, "main").unwrap_err();
        assert_eq!(err.status(), Some(0));
        assert_eq!(err.to_string(), "Pagecraft API error 0: connection refused");
    }

    #[test]
    fn every_round_trip_surfaces_not_found() {
        let transport = StubTransport::new(Ok(not_found()));
        let c = client();
        let errors = [
            c.get_categories(&transport).unwrap_err(),
            c.get_pages(&transport, &PagesQuery::default()).unwrap_err(),
            c.get_page_by_slug(&transport, "missing", None).unwrap_err(),
            c.get_menu_by_id(&transport, "missing").unwrap_err(),
        ];
        for err in errors {
            assert!(err.to_string().contains("404"));
            assert!(err.to_string().contains("Not Found"));
        }
    }
}
