//! Product lookup capability.
//!
//! The cart snapshots product data at add-time; it only needs to turn ids into
//! records. Anything that can do that (the in-process catalog, a remote
//! product service, a test fake) implements [`ProductLookup`].

use async_trait::async_trait;
use thiserror::Error;

use crate::product::{Product, ProductId};

/// Failure of the lookup collaborator itself (not "product not found").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("product lookup unavailable: {0}")]
    Unavailable(String),

    #[error("product lookup returned a malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Resolve a single product; `Ok(None)` means not found.
    async fn resolve_one(&self, id: &ProductId) -> Result<Option<Product>, LookupError>;

    /// Resolve a batch; returns only the products that exist, in no particular order.
    async fn resolve_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, LookupError>;
}
