//! In-memory product catalog.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use storefront_core::DomainResult;

use crate::lookup::{LookupError, ProductLookup};
use crate::product::{NewProduct, Product, ProductId};
use crate::seed::seed_products;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

/// Listing filters. Every field is optional; absent filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Insertion-ordered product list behind a lock.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the demo product list.
    pub fn seeded() -> Self {
        Self::with_products(seed_products(Utc::now()))
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn list(&self, query: &ProductQuery) -> ProductPage {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let page = query.page.unwrap_or(1).max(1);
        let needle = query.search.as_ref().map(|s| s.to_lowercase());

        let matching: Vec<Product> = self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|p| query.category.as_ref().is_none_or(|c| &p.category == c))
            .filter(|p| query.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| query.max_price.is_none_or(|max| p.price <= max))
            .filter(|p| query.in_stock.is_none_or(|s| p.in_stock == s))
            .filter(|p| needle.as_deref().is_none_or(|n| p.matches_search(n)))
            .cloned()
            .collect();

        let total = matching.len();
        let total_pages = total.div_ceil(limit);
        let products = matching
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        ProductPage {
            products,
            pagination: Pagination {
                total,
                page,
                limit,
                total_pages,
            },
        }
    }

    /// Validate and append a new product.
    pub fn create(&self, new_product: NewProduct) -> DomainResult<Product> {
        let product = new_product.into_product(Utc::now())?;
        let mut products = self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        products.push(product.clone());
        tracing::info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }
}

#[async_trait]
impl ProductLookup for InMemoryCatalog {
    async fn resolve_one(&self, id: &ProductId) -> Result<Option<Product>, LookupError> {
        Ok(self.get(id))
    }

    async fn resolve_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, LookupError> {
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        Ok(products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}
