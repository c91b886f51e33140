use thiserror::Error;

use storefront_catalog::{LookupError, ProductId};

/// Failure of a single cart operation. Nothing is applied when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product lookup has no record for the id being added.
    #[error("Product not found")]
    ProductNotFound(ProductId),

    /// The user's cart does not contain the product being updated.
    #[error("Item not found in cart")]
    ItemNotFound(ProductId),

    /// An add would leave the stored quantity negative (or overflow it).
    #[error("invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },

    /// The lookup collaborator itself failed; not retried.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
