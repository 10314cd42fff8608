//! Product detail page widgets.
//!
//! The catalog backend owns products; this module only reads them and builds
//! the pieces of the detail page:
//! - Price, stock and description block
//! - Image gallery
//! - Size and metal options
//! - Review summary
//! - Related products
//! - Share links and wishlist state

pub mod error;
pub mod gallery;
pub mod info;
pub mod options;
pub mod related;
pub mod reviews;
pub mod share;
pub mod wishlist;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_shared::types::Cents;

pub use error::CatalogError;
pub use gallery::Gallery;
pub use info::ProductInfo;
pub use options::{OptionSelection, ProductOptions};
pub use related::{RelatedProduct, related_products};
pub use reviews::ReviewSummary;
pub use share::ShareLinks;
pub use wishlist::{
    BulkRemoval, CollectionSummary, ItemDetails, PriceDrop, Priority, Wishlist, WishlistItem,
    WishlistStats, WishlistToggle,
};

/// A product as returned by the catalog's detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// One-line description.
    #[serde(default)]
    pub short_description: Option<String>,
    /// Price.
    pub price: Cents,
    /// Original price when on sale.
    #[serde(default)]
    pub compare_at_price: Option<Cents>,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Legacy category string.
    #[serde(default)]
    pub category: Option<String>,
    /// Category name resolved by the catalog.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Product type (ring, necklace, ...).
    #[serde(default)]
    pub product_type: Option<String>,
    /// Materials, e.g. `18k Yellow Gold`.
    #[serde(default)]
    pub materials: Option<Vec<String>>,
    /// Care instructions.
    #[serde(default)]
    pub care_instructions: Option<String>,
    /// Units on hand.
    #[serde(default)]
    pub inventory_count: Option<i64>,
    /// Whether stock is tracked at all.
    #[serde(default)]
    pub track_inventory: Option<bool>,
    /// Count at or below which stock is low.
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
    /// Legacy single image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Gallery images.
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    /// Hero image.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Alt text per gallery image.
    #[serde(default)]
    pub image_alt_texts: Option<Vec<String>>,
    /// Mean review rating (0-5).
    #[serde(default)]
    pub average_rating: Option<Decimal>,
    /// Number of reviews.
    #[serde(default)]
    pub review_count: Option<u64>,
    /// Title used for social sharing.
    #[serde(default)]
    pub social_share_title: Option<String>,
    /// Description used for social sharing.
    #[serde(default)]
    pub social_share_description: Option<String>,
}

impl Product {
    /// Category from either the resolved or the legacy field.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category_name
            .as_deref()
            .or(self.category.as_deref())
            .filter(|c| !c.is_empty())
    }
}

/// A product as returned by the catalog's list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    /// Catalog id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Price.
    pub price: Cents,
    /// Image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Category name.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Featured flag.
    #[serde(default)]
    pub featured: bool,
    /// Availability.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Mean review rating.
    #[serde(default)]
    pub average_rating: Option<Decimal>,
}

fn default_in_stock() -> bool {
    true
}

/// Settings for building a detail page.
#[derive(Debug, Clone)]
pub struct DetailContext {
    /// Public storefront base URL.
    pub storefront_url: String,
    /// Maximum related products.
    pub related_limit: usize,
}

/// Everything the product detail page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetailView {
    /// Price, stock and description block.
    pub info: ProductInfo,
    /// Image gallery.
    pub gallery: Gallery,
    /// Purchase options.
    pub options: ProductOptions,
    /// Review summary.
    pub reviews: ReviewSummary,
    /// Related products.
    pub related: Vec<RelatedProduct>,
    /// Share links.
    pub share: ShareLinks,
    /// Whether the product is wishlisted.
    pub in_wishlist: bool,
    /// Set when a wishlisted product now costs less than when it was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_drop: Option<PriceDrop>,
}

impl ProductDetailView {
    /// Builds the page from the product, the related-product candidates and
    /// the visitor's saved entry for it, if any.
    #[must_use]
    pub fn build(
        product: &Product,
        candidates: &[ProductCard],
        context: &DetailContext,
        saved: Option<&WishlistItem>,
    ) -> Self {
        Self {
            info: ProductInfo::from_product(product),
            gallery: Gallery::from_product(product),
            options: ProductOptions::for_product(product),
            reviews: ReviewSummary::new(product.average_rating, product.review_count),
            related: related_products(product, candidates, context.related_limit),
            share: ShareLinks::for_product(product, &context.storefront_url),
            in_wishlist: saved.is_some(),
            price_drop: saved.and_then(|item| item.price_drop(product.price)),
        }
    }
}
