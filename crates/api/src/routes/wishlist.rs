//! Wishlist routes. Every wishlist belongs to the visitor named by the
//! `x-visitor-id` header.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use maison_core::catalog::{
    BulkRemoval, CatalogError, CollectionSummary, ItemDetails, Wishlist, WishlistItem,
    WishlistStats,
};
use maison_shared::AppError;
use maison_shared::types::{Cents, PageMeta, PageRequest};

use super::error_response;
use crate::AppState;
use crate::middleware::Visitor;

/// Creates the wishlist routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(list_wishlist).delete(bulk_remove))
        .route("/wishlist/stats", get(wishlist_stats))
        .route("/wishlist/collections", get(list_collections))
        .route("/wishlist/check/{product_id}", get(check_product))
        .route(
            "/wishlist/{product_id}",
            post(toggle_wishlist).put(save_item).delete(remove_item),
        )
}

/// Query parameters for the wishlist listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Only items filed under this collection.
    pub collection: Option<String>,
    /// Page, 1-based.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// One page of saved items, newest first.
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    /// Items on this page.
    pub items: Vec<WishlistItem>,
    /// Items across all pages.
    pub count: usize,
    /// Page position.
    pub page: PageMeta,
}

/// Membership of one product.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// Product asked about.
    pub product_id: i64,
    /// Whether it is saved.
    pub in_wishlist: bool,
    /// The saved entry.
    pub item: Option<WishlistItem>,
}

/// Outcome of removing one product.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    /// Removed product.
    pub product_id: i64,
    /// Toast text.
    pub message: String,
    /// Items left.
    pub count: usize,
}

/// Body of a bulk removal.
#[derive(Debug, Deserialize)]
pub struct BulkRemoveRequest {
    /// Products to remove.
    pub product_ids: Vec<i64>,
}

async fn current_price(state: &AppState, product_id: i64) -> Result<Cents, AppError> {
    Ok(state.catalog.product(product_id).await?.price)
}

/// GET /wishlist
async fn list_wishlist(
    State(state): State<AppState>,
    visitor: Visitor,
    Query(query): Query<ListQuery>,
) -> Json<WishlistResponse> {
    let items = state
        .wishlists
        .read()
        .await
        .get(visitor.id())
        .map(|w| w.items(query.collection.as_deref()))
        .unwrap_or_default();
    let count = items.len();
    let request = PageRequest::from_query(query.page, query.per_page).unwrap_or_default();
    let (items, page) = request.slice(items);

    Json(WishlistResponse { items, count, page })
}

/// POST /wishlist/{product_id}
///
/// Toggles membership; unknown products are rejected with 404.
async fn toggle_wishlist(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(product_id): Path<i64>,
) -> Response {
    let price = match current_price(&state, product_id).await {
        Ok(price) => price,
        Err(e) => return error_response(e),
    };

    let toggled = state
        .wishlists
        .write()
        .await
        .entry(visitor.id().to_string())
        .or_default()
        .toggle(product_id, price, Utc::now());
    info!(
        visitor = visitor.id(),
        product_id,
        in_wishlist = toggled.in_wishlist,
        "Wishlist toggled"
    );
    Json(toggled).into_response()
}

/// PUT /wishlist/{product_id}
///
/// Saves the product with notes, collection, priority and price alerts, or
/// updates those fields if it is already saved.
async fn save_item(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(product_id): Path<i64>,
    Json(details): Json<ItemDetails>,
) -> Response {
    let price = match current_price(&state, product_id).await {
        Ok(price) => price,
        Err(e) => return error_response(e),
    };

    let mut wishlists = state.wishlists.write().await;
    let wishlist = wishlists.entry(visitor.id().to_string()).or_default();
    match wishlist.save(product_id, price, &details, Utc::now()) {
        Ok(item) => {
            info!(visitor = visitor.id(), product_id, "Wishlist item saved");
            Json(item.clone()).into_response()
        }
        Err(e) => error_response(AppError::from(e)),
    }
}

/// DELETE /wishlist/{product_id}
async fn remove_item(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(product_id): Path<i64>,
) -> Response {
    let remaining = state
        .wishlists
        .write()
        .await
        .get_mut(visitor.id())
        .ok_or(CatalogError::NotInWishlist(product_id))
        .and_then(|w| w.remove(product_id).map(|_| w.len()));

    match remaining {
        Ok(count) => {
            info!(visitor = visitor.id(), product_id, "Wishlist item removed");
            Json(RemoveResponse {
                product_id,
                message: "Removed from wishlist".to_string(),
                count,
            })
            .into_response()
        }
        Err(e) => error_response(AppError::from(e)),
    }
}

/// DELETE /wishlist
///
/// Removes every listed product that is saved; unknown ids are skipped.
async fn bulk_remove(
    State(state): State<AppState>,
    visitor: Visitor,
    Json(request): Json<BulkRemoveRequest>,
) -> Json<BulkRemoval> {
    let removed = state
        .wishlists
        .write()
        .await
        .get_mut(visitor.id())
        .map_or(
            BulkRemoval {
                removed_count: 0,
                requested_count: request.product_ids.len(),
            },
            |w| w.remove_many(&request.product_ids),
        );
    info!(
        visitor = visitor.id(),
        removed = removed.removed_count,
        requested = removed.requested_count,
        "Wishlist items removed"
    );
    Json(removed)
}

/// GET /wishlist/check/{product_id}
async fn check_product(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(product_id): Path<i64>,
) -> Json<CheckResponse> {
    let item = state
        .wishlists
        .read()
        .await
        .get(visitor.id())
        .and_then(|w| w.get(product_id))
        .cloned();
    Json(CheckResponse {
        product_id,
        in_wishlist: item.is_some(),
        item,
    })
}

/// GET /wishlist/stats
async fn wishlist_stats(State(state): State<AppState>, visitor: Visitor) -> Json<WishlistStats> {
    let wishlists = state.wishlists.read().await;
    let stats = wishlists
        .get(visitor.id())
        .map_or_else(|| Wishlist::new().stats(), Wishlist::stats);
    Json(stats)
}

/// GET /wishlist/collections
async fn list_collections(
    State(state): State<AppState>,
    visitor: Visitor,
) -> Json<Vec<CollectionSummary>> {
    let collections = state
        .wishlists
        .read()
        .await
        .get(visitor.id())
        .map(Wishlist::collections)
        .unwrap_or_default();
    Json(collections)
}
