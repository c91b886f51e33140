//! Product catalog.
//!
//! Owns the product record, the [`ProductLookup`] capability the cart depends
//! on, and an in-memory catalog that implements it (listing, filtering,
//! creation).

pub mod catalog;
pub mod lookup;
pub mod product;
pub mod seed;

pub use catalog::{InMemoryCatalog, Pagination, ProductPage, ProductQuery};
pub use lookup::{LookupError, ProductLookup};
pub use product::{NewProduct, Product, ProductId};
