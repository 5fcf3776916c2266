//! Pure helpers over already-fetched content. None of them fail.

use crate::types::{Category, ContentBlock, Image, ImageVariant, PageDetail, PageSummary};

/// Position of the "large" rendition in `Image::variants`.
///
/// Upstream convention, not verified against `width`/`height`.
const LARGE_VARIANT_INDEX: usize = 1;

/// Page shapes that carry a category list.
pub trait HasCategories {
    fn categories(&self) -> &[Category];
}

impl HasCategories for PageSummary {
    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

impl HasCategories for PageDetail {
    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// Case-insensitive check of `style` against the block's style tags.
pub fn block_has_style(block: &ContentBlock, style: &str) -> bool {
    let wanted = style.to_lowercase();
    block.styles().iter().any(|s| s.to_lowercase() == wanted)
}

/// The second variant of `image`, or `None` when it has fewer than two.
pub fn large_image_variant(image: &Image) -> Option<&ImageVariant> {
    image.variants.get(LARGE_VARIANT_INDEX)
}

/// First image of an image block. Other block types have none.
pub fn first_image(block: &ContentBlock) -> Option<&Image> {
    match block {
        ContentBlock::Image(b) => b.images.first(),
        _ => None,
    }
}

/// Exact, case-sensitive match of `category_slug` against the page's categories.
pub fn has_category<P: HasCategories + ?Sized>(page: &P, category_slug: &str) -> bool {
    page.categories().iter().any(|c| c.slug == category_slug)
}
