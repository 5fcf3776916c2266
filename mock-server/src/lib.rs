//! Local stand-in for the Pagecraft public API.
//!
//! Serves one project of fixture content under `/public/{project_id}`. The
//! bearer token is enforced (401 otherwise) and an unknown project answers
//! 404. JSON shapes are written out by hand and are independent of the client
//! crate's types.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DEFAULT_TOKEN: &str = "test-token";
pub const DEFAULT_PROJECT: &str = "demo-project";

/// Content of the single project the server hosts.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub token: String,
    pub project_id: String,
    pub categories: Vec<Value>,
    /// Published pages in listing order, in their detail shape.
    pub pages: Vec<Value>,
    /// Draft versions keyed by slug, served for `?v=draft`.
    pub drafts: HashMap<String, Value>,
    pub menus: HashMap<String, Value>,
}

type Shared = Arc<Fixture>;

#[derive(Deserialize)]
struct VersionQuery {
    v: Option<String>,
}

pub fn app() -> Router {
    app_with(Fixture::sample())
}

pub fn app_with(fixture: Fixture) -> Router {
    Router::new()
        .route("/public/{project_id}", get(get_categories))
        .route("/public/{project_id}/pages", get(list_pages))
        .route("/public/{project_id}/pages/{slug}", get(get_page))
        .route("/public/{project_id}/menus/{id}", get(get_menu))
        .with_state(Arc::new(fixture))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reject a request whose token or project does not match the fixture.
fn authorize(fixture: &Fixture, headers: &HeaderMap, project_id: &str) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", fixture.token);
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if presented != Some(expected.as_str()) {
        log::info!("rejected request for {project_id}: bad or missing bearer token");
        return Err(StatusCode::UNAUTHORIZED);
    }
    if project_id != fixture.project_id {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(())
}

/// Listing projection: the detail shape without `meta` and `content`.
fn summary(page: &Value) -> Value {
    let mut page = page.clone();
    if let Some(obj) = page.as_object_mut() {
        obj.remove("meta");
        obj.remove("content");
    }
    page
}

fn in_category(page: &Value, slug: &str) -> bool {
    page["categories"]
        .as_array()
        .map(|cats| cats.iter().any(|c| c["slug"] == slug))
        .unwrap_or(false)
}

async fn get_categories(
    State(fixture): State<Shared>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorize(&fixture, &headers, &project_id)?;
    Ok(Json(json!({ "categories": fixture.categories })))
}

/// `start` skips that many matches; `offset` caps the page size.
async fn list_pages(
    State(fixture): State<Shared>,
    Path(project_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorize(&fixture, &headers, &project_id)?;

    let parse = |key: &str| -> Result<Option<usize>, StatusCode> {
        params
            .get(key)
            .map(|v| v.parse::<usize>().map_err(|_| StatusCode::BAD_REQUEST))
            .transpose()
    };
    let start = parse("start")?.unwrap_or(0);
    let offset = parse("offset")?;

    let matching: Vec<&Value> = fixture
        .pages
        .iter()
        .filter(|p| match params.get("filter.category.slug") {
            Some(slug) => in_category(p, slug),
            None => true,
        })
        .collect();
    let total = matching.len();
    let items: Vec<Value> = matching
        .into_iter()
        .skip(start)
        .take(offset.unwrap_or(usize::MAX))
        .map(summary)
        .collect();

    Ok(Json(json!({ "items": items, "total": total })))
}

async fn get_page(
    State(fixture): State<Shared>,
    Path((project_id, slug)): Path<(String, String)>,
    Query(version): Query<VersionQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorize(&fixture, &headers, &project_id)?;
    if version.v.as_deref() == Some("draft") {
        if let Some(draft) = fixture.drafts.get(&slug) {
            return Ok(Json(draft.clone()));
        }
    }
    fixture
        .pages
        .iter()
        .find(|p| p["slug"] == slug.as_str())
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_menu(
    State(fixture): State<Shared>,
    Path((project_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorize(&fixture, &headers, &project_id)?;
    fixture
        .menus
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn image(name: &str) -> Value {
    json!({
        "alt": format!("{name} cover"),
        "variants": [
            { "url": format!("https://cdn.pagecraft.co/{name}-320.jpg"), "width": 320, "height": 180, "filename": format!("{name}-320.jpg") },
            { "url": format!("https://cdn.pagecraft.co/{name}-1280.jpg"), "width": 1280, "height": 720, "filename": format!("{name}-1280.jpg") }
        ]
    })
}

impl Fixture {
    /// A small blog-style project: three categories, four pages, one menu.
    pub fn sample() -> Self {
        let blog = json!({ "name": "Blog", "slug": "blog" });
        let news = json!({ "name": "News", "slug": "news" });
        let company = json!({ "name": "Company", "slug": "company" });

        let about = json!({
            "title": "About us",
            "subtitle": "Who we are",
            "image": image("about"),
            "slug": "about-us",
            "categories": [company.clone()],
            "createdAt": "2024-01-10T09:00:00Z",
            "updatedAt": "2024-03-01T12:30:00Z",
            "meta": { "title": "About us | Demo", "description": "The team behind the demo." },
            "content": [
                { "type": "header", "text": "About us", "level": 1, "styles": ["Hero"] },
                { "type": "text", "text": "We build things.", "styles": ["Highlight", "Lead"] },
                { "type": "image", "styles": [], "images": [image("team")] },
                { "type": "list", "styles": [], "items": ["Design", "Engineering"], "ordered": false },
                { "type": "cta", "styles": ["primary"], "text": "Join us", "url": "/careers" },
                { "type": "custom", "styles": [], "blockId": "team-grid", "columns": 3 }
            ]
        });
        let mut about_draft = about.clone();
        about_draft["title"] = json!("About us (draft)");

        let pages = vec![
            about,
            json!({
                "title": "Hello world",
                "subtitle": "Our first post",
                "slug": "hello-world",
                "categories": [blog.clone()],
                "createdAt": "2024-02-01T08:00:00Z",
                "updatedAt": "2024-02-01T08:00:00Z",
                "meta": { "title": "Hello world", "description": "First post." },
                "content": [
                    { "type": "code", "styles": [], "code": "println!(\"hi\");", "language": "rust" },
                    { "type": "embed", "styles": [], "url": "https://video.example/intro" }
                ]
            }),
            json!({
                "title": "Release notes",
                "subtitle": "",
                "slug": "release-notes",
                "categories": [blog.clone(), news.clone()],
                "createdAt": "2024-02-15T08:00:00Z",
                "updatedAt": "2024-02-20T10:00:00Z",
                "meta": { "title": "Release notes", "description": "What changed." },
                "content": []
            }),
            json!({
                "title": "Launch day",
                "subtitle": "It is here",
                "slug": "launch-day",
                "categories": [news.clone()],
                "createdAt": "2024-03-05T08:00:00Z",
                "updatedAt": "2024-03-05T08:00:00Z",
                "meta": { "title": "Launch day", "description": "Launch announcement." },
                "content": [{ "type": "text", "styles": [], "text": "Today we launch." }]
            }),
        ];

        let main_menu = json!({
            "id": "main",
            "name": "Main navigation",
            "items": [
                { "title": "Home", "icon": "home", "url": "/", "styles": [], "children": [] },
                {
                    "title": "Blog", "subtitle": "Latest posts", "icon": "pen", "url": "/blog", "styles": ["bold"],
                    "children": [
                        { "title": "News", "icon": "", "url": "/blog/news", "styles": [], "children": [] }
                    ]
                }
            ]
        });

        Self {
            token: DEFAULT_TOKEN.to_string(),
            project_id: DEFAULT_PROJECT.to_string(),
            categories: vec![blog, news, company],
            pages,
            drafts: HashMap::from([("about-us".to_string(), about_draft)]),
            menus: HashMap::from([("main".to_string(), main_menu)]),
        }
    }
}
