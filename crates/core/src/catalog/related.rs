//! "You may also like" products.

use serde::{Deserialize, Serialize};

use maison_shared::types::{Cents, Rounding, format_currency};

use super::{Product, ProductCard};

/// Default number of related products.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// A related product tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedProduct {
    /// Catalog id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Price.
    pub price: Cents,
    /// Formatted price.
    pub price_display: String,
    /// Image.
    pub image_url: Option<String>,
    /// Link target under `/products/`.
    pub href: String,
    /// Availability.
    pub in_stock: bool,
}

impl From<&ProductCard> for RelatedProduct {
    fn from(card: &ProductCard) -> Self {
        let handle = card
            .slug
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| card.id.to_string());
        Self {
            id: card.id,
            name: card.name.clone(),
            price: card.price,
            price_display: format_currency(card.price, Rounding::Exact),
            image_url: card.image_url.clone(),
            href: format!("/products/{handle}"),
            in_stock: card.in_stock,
        }
    }
}

/// Same-category products other than `product`, in-stock first, at most `limit`.
///
/// A product without a category matches nothing.
#[must_use]
pub fn related_products(
    product: &Product,
    candidates: &[ProductCard],
    limit: usize,
) -> Vec<RelatedProduct> {
    let Some(category) = product.category() else {
        return Vec::new();
    };

    let mut matches: Vec<&ProductCard> = candidates
        .iter()
        .filter(|c| c.id != product.id)
        .filter(|c| {
            c.category_name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(category))
        })
        .collect();
    // stable: catalog order within each group
    matches.sort_by_key(|c| !c.in_stock);

    matches
        .into_iter()
        .take(limit)
        .map(RelatedProduct::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64, category: &str, in_stock: bool) -> ProductCard {
        ProductCard {
            id,
            name: format!("Piece {id}"),
            price: Cents(10_000),
            category_name: Some(category.to_string()),
            in_stock,
            ..ProductCard::default()
        }
    }

    fn product() -> Product {
        Product {
            id: 1,
            category_name: Some("Rings".to_string()),
            ..Product::default()
        }
    }

    #[test]
    fn test_excludes_self_and_other_categories() {
        let candidates = vec![
            card(1, "Rings", true),
            card(2, "Necklaces", true),
            card(3, "rings", true),
        ];
        let related = related_products(&product(), &candidates, DEFAULT_RELATED_LIMIT);
        let ids: Vec<i64> = related.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_in_stock_first_then_limit() {
        let candidates = vec![
            card(2, "Rings", false),
            card(3, "Rings", true),
            card(4, "Rings", false),
            card(5, "Rings", true),
            card(6, "Rings", true),
        ];
        let related = related_products(&product(), &candidates, 4);
        let ids: Vec<i64> = related.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 5, 6, 2]);
    }

    #[test]
    fn test_no_category_yields_nothing() {
        let candidates = vec![card(2, "Rings", true)];
        assert!(related_products(&Product::default(), &candidates, 4).is_empty());
    }

    #[test]
    fn test_href_prefers_slug() {
        let mut c = card(9, "Rings", true);
        assert_eq!(RelatedProduct::from(&c).href, "/products/9");
        c.slug = Some("halo-ring".to_string());
        let tile = RelatedProduct::from(&c);
        assert_eq!(tile.href, "/products/halo-ring");
        assert_eq!(tile.price_display, "$100.00");
    }
}
