//! Catalog widget errors.

use thiserror::Error;

use maison_shared::AppError;

/// Errors raised by product detail widgets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A required option was not chosen.
    #[error("Please select a {0}")]
    MissingOption(&'static str),

    /// The chosen value is not offered for this product.
    #[error("Invalid {option}: {value}")]
    InvalidOption {
        /// Option name.
        option: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Gallery index outside the image list.
    #[error("Image {0} does not exist")]
    ImageOutOfRange(usize),

    /// A wishlist field was rejected.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The product is not on the wishlist.
    #[error("Product {0} is not in the wishlist")]
    NotInWishlist(i64),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotInWishlist(_) => Self::NotFound(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
