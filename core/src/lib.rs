//! Typed client core for the Pagecraft public content API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the four
//! read-only endpoints of the public API: categories, pages, page detail and
//! menus. A `Transport` executes the round-trip; `UreqTransport` is the
//! default, and hosts with their own HTTP stack can drive `build_*` /
//! `parse_*` directly.
//!
//! # Design
//! - `PagecraftClient` holds only its validated `ApiConfig`; calls share no
//!   mutable state, and nothing is cached or retried.
//! - Every non-2xx status and every connection failure collapse into
//!   `ApiError::Request`, whose message embeds the status code.
//! - `utils` holds pure helpers over already-fetched shapes.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod utils;

pub use client::PagecraftClient;
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{
    Category, CategoryFilter, CodeBlock, ContentBlock, CtaBlock, CustomBlock, EmbedBlock,
    HeaderBlock, Image, ImageBlock, ImageVariant, ListBlock, Menu, MenuItem, PageDetail,
    PageFilters, PageMeta, PageSummary, PagesQuery, PagesResponse, TextBlock,
};
pub use utils::{block_has_style, first_image, has_category, large_image_variant, HasCategories};
