//! In-memory [`ProductLookup`] fake for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use storefront_catalog::{LookupError, Product, ProductId, ProductLookup};

/// Product fixture with the given id and price; other fields are filler.
pub fn product(id: &str, price: f64) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId::new(id),
        name: format!("Test Product {id}"),
        price,
        description: "A test product".to_string(),
        image: format!("https://example.com/{id}.jpg"),
        data_ai_hint: "test product hint".to_string(),
        category: "test".to_string(),
        in_stock: true,
        discount: None,
        created_at: now,
        updated_at: now,
    }
}

/// Resolves against a fixed product list and records every id it is asked for.
#[derive(Debug, Default)]
pub struct FakeLookup {
    products: Vec<Product>,
    unavailable: bool,
    calls: Mutex<Vec<ProductId>>,
}

impl FakeLookup {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// A lookup whose transport is down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ProductId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductLookup for FakeLookup {
    async fn resolve_one(&self, id: &ProductId) -> Result<Option<Product>, LookupError> {
        self.calls.lock().unwrap().push(id.clone());
        if self.unavailable {
            return Err(LookupError::Unavailable("connection refused".to_string()));
        }
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }

    async fn resolve_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, LookupError> {
        self.calls.lock().unwrap().extend(ids.iter().cloned());
        if self.unavailable {
            return Err(LookupError::Unavailable("connection refused".to_string()));
        }
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}
