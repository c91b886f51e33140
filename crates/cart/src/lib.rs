//! Shopping cart domain module.
//!
//! One cart per user, kept in memory for the life of the process. Product data
//! is snapshotted through a [`storefront_catalog::ProductLookup`] when an item
//! is first added; totals are recomputed from scratch after every mutation.

pub mod cart;
pub mod error;
pub mod store;

#[cfg(test)]
mod fake;

pub use cart::{Cart, CartItem, CartSummary};
pub use error::CartError;
pub use store::{CartStore, SharedCart};
