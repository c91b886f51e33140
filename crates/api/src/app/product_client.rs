//! [`ProductLookup`] backed by a remote product service over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use storefront_catalog::{LookupError, Product, ProductId, ProductLookup};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ProductClientError {
    #[error("invalid product service URL `{0}`")]
    InvalidUrl(String),

    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Resolves products with `GET {base}/api/products/{id}`.
///
/// A 404 is "not found"; any other failure is a [`LookupError`]. No retries.
#[derive(Debug, Clone)]
pub struct HttpProductLookup {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProductLookup {
    pub fn new(base_url: &str) -> Result<Self, ProductClientError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base() && matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| ProductClientError::InvalidUrl(base_url.to_string()))?;

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn product_url(&self, id: &ProductId) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can carry path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "products", id.as_str()]);
        }
        url
    }
}

#[async_trait]
impl ProductLookup for HttpProductLookup {
    async fn resolve_one(&self, id: &ProductId) -> Result<Option<Product>, LookupError> {
        let url = self.product_url(id);

        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        match res.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let product = res
                    .json::<Product>()
                    .await
                    .map_err(|e| LookupError::Malformed(e.to_string()))?;
                Ok(Some(product))
            }
            status => {
                tracing::warn!(url = %url, status = %status, "product service error");
                Err(LookupError::Unavailable(format!(
                    "product service returned {status}"
                )))
            }
        }
    }

    async fn resolve_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, LookupError> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(product) = self.resolve_one(id).await? {
                found.push(product);
            }
        }
        Ok(found)
    }
}
