//! Product image gallery.

use serde::{Deserialize, Serialize};

use super::{CatalogError, Product};

/// Shown when a product has no images.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-product.jpg";

/// One gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Image URL.
    pub url: String,
    /// Alt text.
    pub alt: String,
}

/// Ordered images with a selected index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    /// Images in display order.
    pub images: Vec<GalleryImage>,
    /// Index of the image in the main viewer.
    pub selected: usize,
}

impl Gallery {
    /// Collects images from `image_urls`, falling back to the featured and legacy images.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let listed: Vec<&str> = product
            .image_urls
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|url| !url.is_empty())
            .collect();

        let urls = if listed.is_empty() {
            let mut fallback: Vec<&str> = Vec::new();
            for url in [product.featured_image.as_deref(), product.image_url.as_deref()]
                .into_iter()
                .flatten()
            {
                if !url.is_empty() && !fallback.contains(&url) {
                    fallback.push(url);
                }
            }
            fallback
        } else {
            listed
        };

        let alts = product.image_alt_texts.as_deref().unwrap_or_default();
        let images = urls
            .into_iter()
            .enumerate()
            .map(|(i, url)| GalleryImage {
                url: url.to_string(),
                alt: alts
                    .get(i)
                    .filter(|alt| !alt.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| product.name.clone()),
            })
            .collect();

        Self {
            images,
            selected: 0,
        }
    }

    /// The image in the main viewer, or the placeholder.
    #[must_use]
    pub fn current(&self) -> GalleryImage {
        self.images
            .get(self.selected)
            .cloned()
            .unwrap_or_else(|| GalleryImage {
                url: PLACEHOLDER_IMAGE.to_string(),
                alt: String::new(),
            })
    }

    /// Advances, wrapping to the first image.
    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.selected = (self.selected + 1) % self.images.len();
        }
    }

    /// Steps back, wrapping to the last image.
    pub fn previous(&mut self) {
        if !self.images.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.images.len() - 1);
        }
    }

    /// Selects a thumbnail.
    pub fn select(&mut self, index: usize) -> Result<(), CatalogError> {
        if index >= self.images.len() {
            return Err(CatalogError::ImageOutOfRange(index));
        }
        self.selected = index;
        Ok(())
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when the product has no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            name: "Soleil Hoops".to_string(),
            image_urls: Some(vec!["/1.jpg".into(), "/2.jpg".into(), "/3.jpg".into()]),
            image_alt_texts: Some(vec!["Front".into(), String::new()]),
            ..Product::default()
        }
    }

    #[test]
    fn test_alt_text_falls_back_to_name() {
        let gallery = Gallery::from_product(&product());
        let alts: Vec<&str> = gallery.images.iter().map(|i| i.alt.as_str()).collect();
        assert_eq!(alts, vec!["Front", "Soleil Hoops", "Soleil Hoops"]);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut gallery = Gallery::from_product(&product());
        gallery.previous();
        assert_eq!(gallery.selected, 2);
        gallery.next();
        assert_eq!(gallery.selected, 0);
        gallery.next();
        assert_eq!(gallery.current().url, "/2.jpg");
    }

    #[test]
    fn test_falls_back_to_featured_then_legacy_image() {
        let p = Product {
            name: "Ring".to_string(),
            featured_image: Some("/hero.jpg".into()),
            image_url: Some("/hero.jpg".into()),
            image_urls: Some(vec![]),
            ..Product::default()
        };
        let gallery = Gallery::from_product(&p);
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.current().url, "/hero.jpg");
    }

    #[test]
    fn test_empty_gallery_uses_placeholder() {
        let mut gallery = Gallery::from_product(&Product::default());
        gallery.next();
        gallery.previous();
        assert!(gallery.is_empty());
        assert_eq!(gallery.current().url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut gallery = Gallery::from_product(&product());
        assert_eq!(gallery.select(3), Err(CatalogError::ImageOutOfRange(3)));
        assert!(gallery.select(1).is_ok());
        assert_eq!(gallery.selected, 1);
    }
}
