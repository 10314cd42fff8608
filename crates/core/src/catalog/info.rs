//! Price, stock and description block.

use serde::{Deserialize, Serialize};

use maison_shared::types::{Cents, Rounding, format_currency};

use super::Product;

/// Stock count at or below which a tracked product shows a low-stock notice.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Availability shown next to the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Available.
    InStock,
    /// Available but running out.
    LowStock,
    /// Not available.
    OutOfStock,
}

/// Header block of the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Catalog id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Description, long form preferred.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Materials.
    pub materials: Vec<String>,
    /// Care instructions.
    pub care_instructions: Option<String>,
    /// SKU.
    pub sku: Option<String>,
    /// Price.
    pub price: Cents,
    /// Formatted price.
    pub price_display: String,
    /// Formatted original price, only when on sale.
    pub compare_price_display: Option<String>,
    /// Compare price is above the current price.
    pub is_on_sale: bool,
    /// Whole percent off, rounded down.
    pub discount_percentage: u32,
    /// Purchasable.
    pub in_stock: bool,
    /// Availability bucket.
    pub stock_status: StockStatus,
    /// Text shown next to the availability badge.
    pub stock_message: String,
}

impl ProductInfo {
    /// Derives the header block from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let on_sale_compare = product
            .compare_at_price
            .filter(|compare| *compare > product.price);
        let stock_status = stock_status(product);

        Self {
            id: product.id,
            name: product.name.clone(),
            description: product
                .description
                .clone()
                .or_else(|| product.short_description.clone()),
            category: product.category().map(str::to_string),
            materials: product.materials.clone().unwrap_or_default(),
            care_instructions: product.care_instructions.clone(),
            sku: product.sku.clone(),
            price: product.price,
            price_display: format_currency(product.price, Rounding::Exact),
            compare_price_display: on_sale_compare
                .map(|compare| format_currency(compare, Rounding::Exact)),
            is_on_sale: on_sale_compare.is_some(),
            discount_percentage: on_sale_compare
                .map_or(0, |compare| discount_percentage(product.price, compare)),
            in_stock: stock_status != StockStatus::OutOfStock,
            stock_status,
            stock_message: stock_message(stock_status, product.inventory_count),
        }
    }
}

/// Whole percent saved against the compare price, rounded down.
#[must_use]
pub fn discount_percentage(price: Cents, compare_at: Cents) -> u32 {
    if compare_at.get() <= 0 || compare_at <= price {
        return 0;
    }
    let saved = compare_at.get() - price.get();
    u32::try_from(saved * 100 / compare_at.get()).unwrap_or(0)
}

/// Untracked inventory is always in stock.
fn stock_status(product: &Product) -> StockStatus {
    if !product.track_inventory.unwrap_or(true) {
        return StockStatus::InStock;
    }
    let count = product.inventory_count.unwrap_or(0);
    let threshold = product
        .low_stock_threshold
        .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    if count <= 0 {
        StockStatus::OutOfStock
    } else if count <= threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

fn stock_message(status: StockStatus, count: Option<i64>) -> String {
    match status {
        StockStatus::InStock => "In Stock".to_string(),
        StockStatus::LowStock => format!("Only {} left", count.unwrap_or(0)),
        StockStatus::OutOfStock => "Out of Stock".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn product(price: i64, compare: Option<i64>) -> Product {
        Product {
            id: 7,
            name: "Celeste Pendant".to_string(),
            price: Cents(price),
            compare_at_price: compare.map(Cents),
            track_inventory: Some(true),
            inventory_count: Some(20),
            ..Product::default()
        }
    }

    #[rstest]
    #[case(7500, 10000, 25)]
    #[case(6667, 10000, 33)]
    #[case(9999, 10000, 0)]
    #[case(10000, 10000, 0)]
    #[case(12000, 10000, 0)]
    fn test_discount_percentage_rounds_down(
        #[case] price: i64,
        #[case] compare: i64,
        #[case] expected: u32,
    ) {
        assert_eq!(discount_percentage(Cents(price), Cents(compare)), expected);
    }

    #[test]
    fn test_on_sale_product() {
        let info = ProductInfo::from_product(&product(7500, Some(10000)));
        assert!(info.is_on_sale);
        assert_eq!(info.price_display, "$75.00");
        assert_eq!(info.compare_price_display.as_deref(), Some("$100.00"));
        assert_eq!(info.discount_percentage, 25);
    }

    #[test]
    fn test_compare_price_not_above_price_is_not_a_sale() {
        let info = ProductInfo::from_product(&product(10000, Some(9000)));
        assert!(!info.is_on_sale);
        assert_eq!(info.compare_price_display, None);
        assert_eq!(info.discount_percentage, 0);
    }

    #[rstest]
    #[case(Some(true), Some(0), StockStatus::OutOfStock, "Out of Stock")]
    #[case(Some(true), Some(3), StockStatus::LowStock, "Only 3 left")]
    #[case(Some(true), Some(50), StockStatus::InStock, "In Stock")]
    #[case(Some(false), Some(0), StockStatus::InStock, "In Stock")]
    #[case(None, None, StockStatus::OutOfStock, "Out of Stock")]
    fn test_stock_status(
        #[case] tracked: Option<bool>,
        #[case] count: Option<i64>,
        #[case] status: StockStatus,
        #[case] message: &str,
    ) {
        let mut p = product(1000, None);
        p.track_inventory = tracked;
        p.inventory_count = count;
        let info = ProductInfo::from_product(&p);
        assert_eq!(info.stock_status, status);
        assert_eq!(info.stock_message, message);
        assert_eq!(info.in_stock, status != StockStatus::OutOfStock);
    }

    #[test]
    fn test_description_falls_back_to_short_description() {
        let mut p = product(1000, None);
        p.short_description = Some("Short".to_string());
        assert_eq!(
            ProductInfo::from_product(&p).description.as_deref(),
            Some("Short")
        );
    }
}
