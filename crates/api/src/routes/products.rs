//! Product detail route.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::warn;

use maison_core::catalog::{ProductCard, ProductDetailView};
use maison_shared::AppError;

use super::error_response;
use crate::AppState;
use crate::middleware::Visitor;

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/products/{id}", get(get_product))
}

/// GET /products/{id}
///
/// Related products are best effort: a failing list call leaves them empty.
/// Wishlist state is read only when the request names a visitor.
async fn get_product(
    State(state): State<AppState>,
    visitor: Option<Visitor>,
    Path(id): Path<i64>,
) -> Response {
    let product = match state.catalog.product(id).await {
        Ok(product) => product,
        Err(e) => return error_response(AppError::from(e)),
    };

    let candidates: Vec<ProductCard> = match product.category() {
        Some(category) => state
            .catalog
            // one extra so the product itself can be dropped
            .products_in_category(category, state.detail.related_limit + 1)
            .await
            .unwrap_or_else(|e| {
                warn!(product_id = id, error = %e, "Failed to load related products");
                Vec::new()
            }),
        None => Vec::new(),
    };

    let saved = match &visitor {
        Some(visitor) => state
            .wishlists
            .read()
            .await
            .get(visitor.id())
            .and_then(|w| w.get(id))
            .cloned(),
        None => None,
    };

    Json(ProductDetailView::build(
        &product,
        &candidates,
        &state.detail,
        saved.as_ref(),
    ))
    .into_response()
}
