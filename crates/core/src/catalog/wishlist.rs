//! Saved products with per-item notes, priority and price tracking.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maison_shared::types::Cents;
use maison_shared::types::money::{Rounding, format_currency};

use super::error::CatalogError;

/// Longest accepted note.
pub const MAX_NOTES_LEN: usize = 1000;

/// Longest accepted collection name.
pub const MAX_COLLECTION_LEN: usize = 100;

/// How much the visitor wants an item. Sent as 1 (high) to 3 (low).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    /// 1
    High,
    /// 2
    Medium,
    /// 3
    #[default]
    Low,
}

impl TryFrom<u8> for Priority {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            _ => Err(CatalogError::InvalidField {
                field: "priority",
                reason: format!("{value} is not between 1 and 3"),
            }),
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        match value {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// Fields a visitor may set when saving or editing an item. Absent fields
/// leave an existing item unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    /// Free-form note.
    #[serde(default)]
    pub notes: Option<String>,
    /// Group name, e.g. "Anniversary".
    #[serde(default)]
    pub collection_name: Option<String>,
    /// Priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Ask to be told when the price falls.
    #[serde(default)]
    pub notify_price_drop: Option<bool>,
}

impl ItemDetails {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.notes.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTES_LEN) {
            return Err(CatalogError::InvalidField {
                field: "notes",
                reason: format!("longer than {MAX_NOTES_LEN} characters"),
            });
        }
        if let Some(name) = &self.collection_name {
            let len = name.trim().chars().count();
            if len == 0 || len > MAX_COLLECTION_LEN {
                return Err(CatalogError::InvalidField {
                    field: "collection_name",
                    reason: format!("must be 1 to {MAX_COLLECTION_LEN} characters"),
                });
            }
        }
        Ok(())
    }
}

/// One saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    /// Catalog id.
    pub product_id: i64,
    /// Visitor's note.
    pub notes: Option<String>,
    /// Collection the item is filed under.
    pub collection_name: Option<String>,
    /// Priority.
    pub priority: Priority,
    /// Catalog price when first saved.
    pub price_when_added: Cents,
    /// Price-drop alerts requested.
    pub notify_price_drop: bool,
    /// First saved.
    pub added_at: DateTime<Utc>,
    /// Last changed.
    pub updated_at: DateTime<Utc>,
}

/// A price lower than the one an item was saved at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDrop {
    /// Price when saved.
    pub was: Cents,
    /// Current price.
    pub now: Cents,
    /// Difference.
    pub savings: Cents,
    /// "Save $250.00".
    pub message: String,
}

impl WishlistItem {
    /// The drop against `current`, if the price fell since the item was saved.
    #[must_use]
    pub fn price_drop(&self, current: Cents) -> Option<PriceDrop> {
        (current < self.price_when_added).then(|| {
            let savings = Cents(self.price_when_added.get().saturating_sub(current.get()));
            PriceDrop {
                was: self.price_when_added,
                now: current,
                savings,
                message: format!("Save {}", format_currency(savings, Rounding::Exact)),
            }
        })
    }

    fn apply(&mut self, details: &ItemDetails, now: DateTime<Utc>) {
        if let Some(notes) = &details.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(name) = &details.collection_name {
            self.collection_name = Some(name.trim().to_string());
        }
        if let Some(priority) = details.priority {
            self.priority = priority;
        }
        if let Some(notify) = details.notify_price_drop {
            self.notify_price_drop = notify;
        }
        self.updated_at = now;
    }
}

/// Result of toggling a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistToggle {
    /// Toggled product.
    pub product_id: i64,
    /// Membership after the toggle.
    pub in_wishlist: bool,
    /// Toast text.
    pub message: String,
    /// Items after the toggle.
    pub count: usize,
}

/// Outcome of removing several products at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRemoval {
    /// Products that were saved and are now gone.
    pub removed_count: usize,
    /// Products named in the request.
    pub requested_count: usize,
}

/// A collection name and how many items it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Collection name.
    pub name: String,
    /// Items filed under it.
    pub item_count: usize,
}

/// Figures for the wishlist header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistStats {
    /// Saved products.
    pub total_items: usize,
    /// Distinct collections in use.
    pub collections: usize,
    /// Sum of the saved prices.
    pub total_value: Cents,
    /// `total_value` formatted.
    pub total_value_display: String,
    /// Items at priority 1.
    pub high_priority_items: usize,
    /// Items with price-drop alerts on.
    pub price_alerts: usize,
}

/// One visitor's saved products, keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    items: BTreeMap<i64, WishlistItem>,
}

impl Wishlist {
    /// Empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a product, or updates the given fields if it is already saved.
    /// The saved price and date of an existing item are kept.
    pub fn save(
        &mut self,
        product_id: i64,
        price: Cents,
        details: &ItemDetails,
        now: DateTime<Utc>,
    ) -> Result<&WishlistItem, CatalogError> {
        details.validate()?;
        let item = self.entry(product_id, price, now);
        item.apply(details, now);
        Ok(item)
    }

    fn entry(&mut self, product_id: i64, price: Cents, now: DateTime<Utc>) -> &mut WishlistItem {
        self.items.entry(product_id).or_insert_with(|| WishlistItem {
            product_id,
            notes: None,
            collection_name: None,
            priority: Priority::default(),
            price_when_added: price,
            notify_price_drop: false,
            added_at: now,
            updated_at: now,
        })
    }

    /// Adds the product if absent, removes it otherwise.
    pub fn toggle(&mut self, product_id: i64, price: Cents, now: DateTime<Utc>) -> WishlistToggle {
        let in_wishlist = if self.items.remove(&product_id).is_some() {
            false
        } else {
            self.entry(product_id, price, now);
            true
        };
        WishlistToggle {
            product_id,
            in_wishlist,
            message: if in_wishlist {
                "Added to wishlist".to_string()
            } else {
                "Removed from wishlist".to_string()
            },
            count: self.items.len(),
        }
    }

    /// Removes one product.
    pub fn remove(&mut self, product_id: i64) -> Result<WishlistItem, CatalogError> {
        self.items
            .remove(&product_id)
            .ok_or(CatalogError::NotInWishlist(product_id))
    }

    /// Removes every listed product that is saved; unknown ids are skipped.
    pub fn remove_many(&mut self, product_ids: &[i64]) -> BulkRemoval {
        let removed_count = product_ids
            .iter()
            .filter(|&&id| self.items.remove(&id).is_some())
            .count();
        BulkRemoval {
            removed_count,
            requested_count: product_ids.len(),
        }
    }

    /// The saved item for a product.
    #[must_use]
    pub fn get(&self, product_id: i64) -> Option<&WishlistItem> {
        self.items.get(&product_id)
    }

    /// Membership check.
    #[must_use]
    pub fn contains(&self, product_id: i64) -> bool {
        self.items.contains_key(&product_id)
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items newest first, optionally only one collection's.
    #[must_use]
    pub fn items(&self, collection: Option<&str>) -> Vec<WishlistItem> {
        let mut items: Vec<WishlistItem> = self
            .items
            .values()
            .filter(|item| {
                collection.is_none_or(|name| item.collection_name.as_deref() == Some(name))
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        items
    }

    /// Collections in use, by name.
    #[must_use]
    pub fn collections(&self) -> Vec<CollectionSummary> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for name in self.items.values().filter_map(|i| i.collection_name.as_deref()) {
            *counts.entry(name).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(name, item_count)| CollectionSummary {
                name: name.to_string(),
                item_count,
            })
            .collect()
    }

    /// Header figures.
    #[must_use]
    pub fn stats(&self) -> WishlistStats {
        let total_value: Cents = self.items.values().map(|i| i.price_when_added).sum();
        WishlistStats {
            total_items: self.items.len(),
            collections: self.collections().len(),
            total_value,
            total_value_display: format_currency(total_value, Rounding::Exact),
            high_priority_items: self
                .items
                .values()
                .filter(|i| i.priority == Priority::High)
                .count(),
            price_alerts: self.items.values().filter(|i| i.notify_price_drop).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    use super::*;

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minute)
    }

    fn details(collection: &str, priority: Priority) -> ItemDetails {
        ItemDetails {
            collection_name: Some(collection.to_string()),
            priority: Some(priority),
            ..ItemDetails::default()
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut wishlist = Wishlist::new();
        let added = wishlist.toggle(5, Cents(10_000), at(0));
        assert!(added.in_wishlist);
        assert_eq!(added.message, "Added to wishlist");
        assert_eq!(wishlist.get(5).unwrap().price_when_added, Cents(10_000));

        let removed = wishlist.toggle(5, Cents(10_000), at(1));
        assert!(!removed.in_wishlist);
        assert_eq!(removed.count, 0);
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_save_updates_only_given_fields() {
        let mut wishlist = Wishlist::new();
        wishlist
            .save(
                3,
                Cents(50_000),
                &ItemDetails {
                    notes: Some("For June".to_string()),
                    notify_price_drop: Some(true),
                    ..details("Anniversary", Priority::High)
                },
                at(0),
            )
            .unwrap();

        let item = wishlist
            .save(
                3,
                Cents(40_000),
                &ItemDetails {
                    priority: Some(Priority::Medium),
                    ..ItemDetails::default()
                },
                at(5),
            )
            .unwrap()
            .clone();

        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.notes.as_deref(), Some("For June"));
        assert_eq!(item.collection_name.as_deref(), Some("Anniversary"));
        assert!(item.notify_price_drop);
        assert_eq!(item.price_when_added, Cents(50_000));
        assert_eq!(item.added_at, at(0));
        assert_eq!(item.updated_at, at(5));
    }

    #[test]
    fn test_save_rejects_blank_collection_and_long_notes() {
        let mut wishlist = Wishlist::new();
        let blank = ItemDetails {
            collection_name: Some("   ".to_string()),
            ..ItemDetails::default()
        };
        assert!(matches!(
            wishlist.save(1, Cents(1), &blank, at(0)),
            Err(CatalogError::InvalidField { field: "collection_name", .. })
        ));

        let long = ItemDetails {
            notes: Some("x".repeat(MAX_NOTES_LEN + 1)),
            ..ItemDetails::default()
        };
        assert!(wishlist.save(1, Cents(1), &long, at(0)).is_err());
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_priority_wire_form() {
        let parsed: ItemDetails = serde_json::from_str(r#"{"priority": 1}"#).unwrap();
        assert_eq!(parsed.priority, Some(Priority::High));
        assert!(serde_json::from_str::<ItemDetails>(r#"{"priority": 4}"#).is_err());
        assert_eq!(serde_json::to_value(Priority::Low).unwrap(), 3);
    }

    #[test]
    fn test_remove_and_bulk_remove() {
        let mut wishlist = Wishlist::new();
        for id in 1..=3 {
            wishlist.toggle(id, Cents(100), at(id));
        }
        assert_eq!(wishlist.remove(2).unwrap().product_id, 2);
        assert_eq!(wishlist.remove(2), Err(CatalogError::NotInWishlist(2)));

        let removed = wishlist.remove_many(&[1, 2, 3, 9]);
        assert_eq!(removed.removed_count, 2);
        assert_eq!(removed.requested_count, 4);
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_items_newest_first_and_by_collection() {
        let mut wishlist = Wishlist::new();
        wishlist.save(1, Cents(100), &details("Gifts", Priority::Low), at(0)).unwrap();
        wishlist.save(2, Cents(200), &ItemDetails::default(), at(1)).unwrap();
        wishlist.save(3, Cents(300), &details("Gifts", Priority::High), at(2)).unwrap();

        let ids: Vec<i64> = wishlist.items(None).iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        let gifts: Vec<i64> = wishlist.items(Some("Gifts")).iter().map(|i| i.product_id).collect();
        assert_eq!(gifts, vec![3, 1]);
        assert_eq!(
            wishlist.collections(),
            vec![CollectionSummary {
                name: "Gifts".to_string(),
                item_count: 2
            }]
        );
    }

    #[test]
    fn test_stats() {
        let mut wishlist = Wishlist::new();
        wishlist.save(1, Cents(125_000), &details("Gifts", Priority::High), at(0)).unwrap();
        wishlist
            .save(
                2,
                Cents(75_050),
                &ItemDetails {
                    notify_price_drop: Some(true),
                    ..details("Rings", Priority::Medium)
                },
                at(1),
            )
            .unwrap();

        let stats = wishlist.stats();
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.collections, 2);
        assert_eq!(stats.total_value, Cents(200_050));
        assert_eq!(stats.total_value_display, "$2,000.50");
        assert_eq!(stats.high_priority_items, 1);
        assert_eq!(stats.price_alerts, 1);
    }

    #[test]
    fn test_price_drop() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(1, Cents(100_000), at(0));
        let item = wishlist.get(1).unwrap();

        assert_eq!(item.price_drop(Cents(100_000)), None);
        assert_eq!(item.price_drop(Cents(120_000)), None);
        let drop = item.price_drop(Cents(75_000)).unwrap();
        assert_eq!(drop.savings, Cents(25_000));
        assert_eq!(drop.message, "Save $250.00");
    }

    proptest! {
        #[test]
        fn prop_double_toggle_is_identity(
            ids in proptest::collection::vec(0i64..50, 0..20),
            id in 0i64..50,
        ) {
            let mut wishlist = Wishlist::new();
            for i in &ids {
                wishlist.toggle(*i, Cents(100), at(0));
            }
            let before = wishlist.clone();
            wishlist.toggle(id, Cents(100), at(0));
            wishlist.toggle(id, Cents(100), at(0));
            prop_assert_eq!(wishlist, before);
        }
    }
}
