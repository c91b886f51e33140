use std::sync::Arc;

use storefront_cart::CartStore;
use storefront_catalog::{InMemoryCatalog, ProductLookup};
use storefront_orders::OrderStore;

use crate::app::product_client::{HttpProductLookup, ProductClientError};
use crate::config::ApiConfig;

/// Stores shared by every handler; built once at startup.
#[derive(Debug)]
pub struct AppServices {
    pub carts: CartStore,
    pub catalog: Arc<InMemoryCatalog>,
    pub orders: OrderStore,
    pub service_name: String,
}

impl AppServices {
    /// Seeded catalog that also backs the cart's product lookup.
    pub fn in_memory(service_name: impl Into<String>) -> Arc<Self> {
        let catalog = Arc::new(InMemoryCatalog::seeded());
        Self::with_lookup(service_name, catalog.clone(), catalog)
    }

    /// Carts resolve products through `lookup`, which need not be `catalog`.
    pub fn with_lookup(
        service_name: impl Into<String>,
        catalog: Arc<InMemoryCatalog>,
        lookup: Arc<dyn ProductLookup>,
    ) -> Arc<Self> {
        Arc::new(Self {
            carts: CartStore::new(lookup),
            catalog,
            orders: OrderStore::new(),
            service_name: service_name.into(),
        })
    }

    /// Wire services per `config`: a remote product service when one is
    /// configured, the in-process catalog otherwise.
    pub fn from_config(config: &ApiConfig) -> Result<Arc<Self>, ProductClientError> {
        match &config.product_service_url {
            Some(url) => {
                let lookup = Arc::new(HttpProductLookup::new(url)?);
                tracing::info!(url = %url, "resolving products via remote product service");
                Ok(Self::with_lookup(
                    config.service_name.clone(),
                    Arc::new(InMemoryCatalog::seeded()),
                    lookup,
                ))
            }
            None => Ok(Self::in_memory(config.service_name.clone())),
        }
    }
}
