//! Size and metal options.

use serde::{Deserialize, Serialize};

use super::{CatalogError, Product};

const RING_SIZES: [&str; 11] = [
    "4", "4.5", "5", "5.5", "6", "6.5", "7", "7.5", "8", "8.5", "9",
];
const NECKLACE_LENGTHS: [&str; 4] = ["16\"", "18\"", "20\"", "24\""];
const BRACELET_LENGTHS: [&str; 3] = ["6.5\"", "7\"", "7.5\""];
const METAL_KEYWORDS: [&str; 4] = ["gold", "platinum", "silver", "palladium"];

/// Options offered on the product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOptions {
    /// Label for the size picker (`Ring Size`, `Length`).
    pub size_label: Option<String>,
    /// Offered sizes.
    pub sizes: Vec<String>,
    /// Offered metals.
    pub metals: Vec<String>,
    /// Size must be chosen before adding to bag.
    pub size_required: bool,
}

/// A customer's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    /// Chosen size.
    pub size: Option<String>,
    /// Chosen metal.
    pub metal: Option<String>,
}

impl ProductOptions {
    /// Derives sizes from the product type and metals from its materials.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        let kind = product
            .product_type
            .as_deref()
            .or_else(|| product.category())
            .unwrap_or_default()
            .to_lowercase();

        let (size_label, sizes, size_required): (Option<&str>, &[&str], bool) =
            if kind.contains("ring") && !kind.contains("earring") {
                (Some("Ring Size"), &RING_SIZES, true)
            } else if kind.contains("necklace") || kind.contains("pendant") {
                (Some("Length"), &NECKLACE_LENGTHS, false)
            } else if kind.contains("bracelet") {
                (Some("Length"), &BRACELET_LENGTHS, false)
            } else {
                (None, &[], false)
            };

        let metals = product
            .materials
            .iter()
            .flatten()
            .filter(|m| {
                let lower = m.to_lowercase();
                METAL_KEYWORDS.iter().any(|k| lower.contains(k))
            })
            .cloned()
            .collect();

        Self {
            size_label: size_label.map(str::to_string),
            sizes: sizes.iter().map(|s| (*s).to_string()).collect(),
            metals,
            size_required,
        }
    }

    /// Checks a selection against the offered values.
    ///
    /// An optional size may be left empty; a lone metal is implied.
    pub fn select(&self, selection: &OptionSelection) -> Result<OptionSelection, CatalogError> {
        let size = match selection.size.as_deref().filter(|s| !s.is_empty()) {
            Some(size) if self.sizes.iter().any(|s| s == size) => Some(size.to_string()),
            Some(size) => {
                return Err(CatalogError::InvalidOption {
                    option: "size",
                    value: size.to_string(),
                });
            }
            None if self.size_required => return Err(CatalogError::MissingOption("size")),
            None => None,
        };

        let metal = match selection.metal.as_deref().filter(|m| !m.is_empty()) {
            Some(metal) => {
                let offered = self.metals.iter().find(|m| m.eq_ignore_ascii_case(metal));
                match offered {
                    Some(m) => Some(m.clone()),
                    None => {
                        return Err(CatalogError::InvalidOption {
                            option: "metal",
                            value: metal.to_string(),
                        });
                    }
                }
            }
            None if self.metals.len() > 1 => return Err(CatalogError::MissingOption("metal")),
            None => self.metals.first().cloned(),
        };

        Ok(OptionSelection { size, metal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Product {
        Product {
            name: "Aurora Ring".to_string(),
            product_type: Some("Ring".to_string()),
            materials: Some(vec![
                "18k Yellow Gold".to_string(),
                "Platinum".to_string(),
                "Diamond".to_string(),
            ]),
            ..Product::default()
        }
    }

    #[test]
    fn test_ring_options() {
        let options = ProductOptions::for_product(&ring());
        assert_eq!(options.size_label.as_deref(), Some("Ring Size"));
        assert!(options.size_required);
        assert_eq!(options.sizes.first().map(String::as_str), Some("4"));
        assert_eq!(options.metals, vec!["18k Yellow Gold", "Platinum"]);
    }

    #[test]
    fn test_earrings_have_no_sizes() {
        let p = Product {
            product_type: Some("Earrings".to_string()),
            ..Product::default()
        };
        let options = ProductOptions::for_product(&p);
        assert!(options.sizes.is_empty());
        assert!(!options.size_required);
    }

    #[test]
    fn test_ring_requires_size() {
        let options = ProductOptions::for_product(&ring());
        let selection = OptionSelection {
            size: None,
            metal: Some("platinum".to_string()),
        };
        assert_eq!(
            options.select(&selection),
            Err(CatalogError::MissingOption("size"))
        );
    }

    #[test]
    fn test_select_normalises_metal_and_rejects_unknown_size() {
        let options = ProductOptions::for_product(&ring());
        let chosen = options
            .select(&OptionSelection {
                size: Some("6.5".to_string()),
                metal: Some("platinum".to_string()),
            })
            .unwrap();
        assert_eq!(chosen.metal.as_deref(), Some("Platinum"));

        let err = options
            .select(&OptionSelection {
                size: Some("15".to_string()),
                metal: Some("Platinum".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidOption { option: "size", .. }));
    }

    #[test]
    fn test_single_metal_is_implied() {
        let p = Product {
            product_type: Some("Necklace".to_string()),
            materials: Some(vec!["Sterling Silver".to_string()]),
            ..Product::default()
        };
        let chosen = ProductOptions::for_product(&p)
            .select(&OptionSelection::default())
            .unwrap();
        assert_eq!(chosen.size, None);
        assert_eq!(chosen.metal.as_deref(), Some("Sterling Silver"));
    }
}
