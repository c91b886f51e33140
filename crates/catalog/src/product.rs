use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::{DomainError, DomainResult};

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_PRICE: f64 = 1_000_000.0;

/// Product identifier.
///
/// Ids are opaque strings; seeded products use short numeric ids (`"1"`),
/// created products get a UUIDv7.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh, time-ordered id for a newly created product.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in major currency units.
    pub price: f64,
    pub description: String,
    pub image: String,
    pub data_ai_hint: String,
    pub category: String,
    pub in_stock: bool,
    /// Percentage discount (0–100). Informational only.
    pub discount: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether `needle` (already lower-cased) occurs in name, description or hint.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.data_ai_hint.to_lowercase().contains(needle)
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub data_ai_hint: String,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub discount: Option<i64>,
}

fn default_in_stock() -> bool {
    true
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation("name is too long"));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::validation("description is too long"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category must not be empty"));
        }

        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("dataAiHint", &self.data_ai_hint),
        ] {
            if value.contains('\0') {
                return Err(DomainError::validation(format!("{field} contains a NUL byte")));
            }
            if value.contains('<') || value.contains('>') {
                return Err(DomainError::validation(format!("{field} must not contain markup")));
            }
        }

        if !self.price.is_finite() || self.price <= 0.0 || self.price > MAX_PRICE {
            return Err(DomainError::validation("price must be positive and at most 1000000"));
        }

        if !(self.image.starts_with("http://") || self.image.starts_with("https://")) {
            return Err(DomainError::validation("image must be an http(s) URL"));
        }

        if let Some(d) = self.discount {
            if !(0..=100).contains(&d) {
                return Err(DomainError::validation("discount must be between 0 and 100"));
            }
        }

        Ok(())
    }

    /// Validate and stamp the payload into a catalog record.
    pub fn into_product(self, now: DateTime<Utc>) -> DomainResult<Product> {
        self.validate()?;
        Ok(Product {
            id: ProductId::generate(),
            name: self.name,
            price: self.price,
            description: self.description,
            image: self.image,
            data_ai_hint: self.data_ai_hint,
            category: self.category,
            in_stock: self.in_stock,
            // Range checked in `validate`.
            discount: self.discount.and_then(|d| u8::try_from(d).ok()),
            created_at: now,
            updated_at: now,
        })
    }
}
