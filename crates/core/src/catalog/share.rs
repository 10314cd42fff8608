//! Social share links.

use serde::{Deserialize, Serialize};
use urlencoding::encode;

use super::Product;

/// Share targets for a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinks {
    /// Canonical product URL.
    pub url: String,
    /// Facebook sharer.
    pub facebook: String,
    /// Twitter / X intent.
    pub twitter: String,
    /// Pinterest pin; only when the product has an image.
    pub pinterest: Option<String>,
    /// `mailto:` link.
    pub email: String,
}

impl ShareLinks {
    /// Builds links for `product` under the storefront base URL.
    #[must_use]
    pub fn for_product(product: &Product, storefront_url: &str) -> Self {
        let url = format!(
            "{}/products/{}",
            storefront_url.trim_end_matches('/'),
            product.id
        );
        let title = product
            .social_share_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&product.name);
        let description = product
            .social_share_description
            .as_deref()
            .or(product.short_description.as_deref())
            .filter(|d| !d.is_empty())
            .unwrap_or(title);
        let image = product
            .featured_image
            .as_deref()
            .or(product.image_url.as_deref())
            .or_else(|| product.image_urls.as_ref()?.first().map(String::as_str))
            .filter(|i| !i.is_empty());

        let encoded_url = encode(&url);
        let encoded_title = encode(title);

        Self {
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={encoded_url}"),
            twitter: format!(
                "https://twitter.com/intent/tweet?url={encoded_url}&text={encoded_title}"
            ),
            pinterest: image.map(|image| {
                format!(
                    "https://pinterest.com/pin/create/button/?url={encoded_url}&media={}&description={encoded_title}",
                    encode(image)
                )
            }),
            email: format!(
                "mailto:?subject={encoded_title}&body={}",
                encode(&format!("{description}\n\n{url}"))
            ),
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 42,
            name: "Lune & Étoile Necklace".to_string(),
            featured_image: Some("https://cdn.maison.example/lune.jpg".to_string()),
            ..Product::default()
        }
    }

    #[test]
    fn test_links_are_encoded() {
        let links = ShareLinks::for_product(&product(), "https://maison.example/");
        assert_eq!(links.url, "https://maison.example/products/42");
        assert_eq!(
            links.facebook,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fmaison.example%2Fproducts%2F42"
        );
        assert!(links.twitter.contains("text=Lune%20%26%20%C3%89toile%20Necklace"));
        assert!(
            links
                .pinterest
                .as_deref()
                .unwrap()
                .contains("media=https%3A%2F%2Fcdn.maison.example%2Flune.jpg")
        );
        assert!(links.email.starts_with("mailto:?subject=Lune%20%26"));
    }

    #[test]
    fn test_share_title_override_and_no_image() {
        let p = Product {
            id: 3,
            name: "Ring".to_string(),
            social_share_title: Some("Our favourite ring".to_string()),
            ..Product::default()
        };
        let links = ShareLinks::for_product(&p, "https://maison.example");
        assert!(links.twitter.ends_with("text=Our%20favourite%20ring"));
        assert_eq!(links.pinterest, None);
    }
}
