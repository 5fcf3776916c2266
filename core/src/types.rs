//! Response shapes of the public API, plus the `getPages` query input.
//!
//! # Design
//! The upstream owns these shapes; the client only maps them. Field names
//! follow the upstream camelCase JSON. Strings the upstream often omits
//! default to empty, whether absent or `null`, rather than failing the whole
//! response. `ContentBlock` is a closed union on the `type` field, so an
//! unknown block type is a decoding error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treat an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

/// One rendition of an image. Position in `Image::variants` matters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageVariant {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ImageVariant>,
}

/// Listing-level projection of a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

/// One page of listing results. `total` counts every match, not just `items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagesResponse {
    pub items: Vec<PageSummary>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// A page with its SEO metadata and body content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageDetail {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: PageMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentBlock>,
}

impl PageDetail {
    /// The listing projection of this page.
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            image: self.image.clone(),
            slug: self.slug.clone(),
            categories: self.categories.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

/// One unit of page body content, discriminated by the JSON `type` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Header(HeaderBlock),
    List(ListBlock),
    Embed(EmbedBlock),
    Image(ImageBlock),
    Code(CodeBlock),
    Text(TextBlock),
    Cta(CtaBlock),
    Custom(CustomBlock),
}

impl ContentBlock {
    /// Free-form style tags attached to the block.
    pub fn styles(&self) -> &[String] {
        match self {
            ContentBlock::Header(b) => &b.styles,
            ContentBlock::List(b) => &b.styles,
            ContentBlock::Embed(b) => &b.styles,
            ContentBlock::Image(b) => &b.styles,
            ContentBlock::Code(b) => &b.styles,
            ContentBlock::Text(b) => &b.styles,
            ContentBlock::Cta(b) => &b.styles,
            ContentBlock::Custom(b) => &b.styles,
        }
    }

    /// The `type` tag as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Header(_) => "header",
            ContentBlock::List(_) => "list",
            ContentBlock::Embed(_) => "embed",
            ContentBlock::Image(_) => "image",
            ContentBlock::Code(_) => "code",
            ContentBlock::Text(_) => "text",
            ContentBlock::Cta(_) => "cta",
            ContentBlock::Custom(_) => "custom",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ordered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CtaBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    pub text: String,
    pub url: String,
}

/// Project-defined block. Everything besides `blockId` and `styles` is kept
/// verbatim in `fields`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    pub block_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Menu {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<MenuItem>,
}

// ---------------------------------------------------------------------------
// Query input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFilters {
    pub category: CategoryFilter,
}

impl PageFilters {
    /// Restrict a listing to pages tagged with the category `slug`.
    pub fn category(slug: impl Into<String>) -> Self {
        Self {
            category: CategoryFilter { slug: slug.into() },
        }
    }
}

/// Optional inputs of `getPages`. `Default` requests the unfiltered listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagesQuery {
    pub filters: Option<PageFilters>,
    pub start: Option<u32>,
    pub offset: Option<u32>,
}
