//! Process-wide cart table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::Utc;

use storefront_catalog::{ProductId, ProductLookup};
use storefront_core::UserId;

use crate::cart::{Cart, CartSummary};
use crate::error::CartError;

/// Handle to a user's live cart. Every caller for the same user gets the same handle.
pub type SharedCart = Arc<Mutex<Cart>>;

/// Owns every user's cart.
///
/// Built once at startup and shared by handle with request handlers. Each cart
/// sits behind its own mutex, so different users never contend and mutations
/// of one user's cart are applied one at a time. The product lookup runs
/// before any cart lock is taken.
pub struct CartStore {
    carts: RwLock<HashMap<UserId, SharedCart>>,
    products: Arc<dyn ProductLookup>,
}

impl core::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartStore")
            .field("carts", &self.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    pub fn new(products: Arc<dyn ProductLookup>) -> Self {
        Self {
            carts: RwLock::new(HashMap::new()),
            products,
        }
    }

    /// Number of carts created so far.
    pub fn len(&self) -> usize {
        self.carts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the user's cart, creating an empty one on first access.
    pub fn get_or_create_cart(&self, user_id: &UserId) -> SharedCart {
        if let Some(cart) = self.existing(user_id) {
            return cart;
        }

        let mut carts = self.carts.write().unwrap_or_else(PoisonError::into_inner);
        carts
            .entry(user_id.clone())
            .or_insert_with(|| {
                tracing::debug!(user_id = %user_id, "creating cart");
                Arc::new(Mutex::new(Cart::new(user_id.clone(), Utc::now())))
            })
            .clone()
    }

    /// Snapshot of the user's cart (created if missing).
    pub fn get_cart(&self, user_id: &UserId) -> Cart {
        lock(&self.get_or_create_cart(user_id)).clone()
    }

    pub fn get_cart_summary(&self, user_id: &UserId) -> CartSummary {
        lock(&self.get_or_create_cart(user_id)).summary()
    }

    /// Add `quantity` (default 1) of `product_id` to the user's cart.
    pub async fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Option<i64>,
    ) -> Result<Cart, CartError> {
        let quantity = quantity.unwrap_or(1);

        let product = match self.products.resolve_one(product_id).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                tracing::warn!(user_id = %user_id, product_id = %product_id, "product not found");
                return Err(CartError::ProductNotFound(product_id.clone()));
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, product_id = %product_id, error = %e, "product lookup failed");
                return Err(e.into());
            }
        };

        let shared = self.get_or_create_cart(user_id);
        let mut cart = lock(&shared);
        cart.add(&product, quantity, Utc::now())?;

        tracing::info!(
            user_id = %user_id,
            product_id = %product.id,
            quantity,
            total_items = cart.total_items(),
            total_amount = cart.total_amount(),
            "item added to cart"
        );
        Ok(cart.clone())
    }

    /// Set an item's quantity; `quantity <= 0` removes it.
    pub fn update_cart_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        let shared = self
            .existing(user_id)
            .ok_or_else(|| CartError::ItemNotFound(product_id.clone()))?;
        let mut cart = lock(&shared);
        cart.set_quantity(product_id, quantity, Utc::now())?;

        tracing::info!(
            user_id = %user_id,
            product_id = %product_id,
            quantity,
            total_items = cart.total_items(),
            total_amount = cart.total_amount(),
            "cart item updated"
        );
        Ok(cart.clone())
    }

    /// Remove an item if present; absent items are not an error.
    pub fn remove_from_cart(&self, user_id: &UserId, product_id: &ProductId) -> Cart {
        let shared = self.get_or_create_cart(user_id);
        let mut cart = lock(&shared);
        cart.remove(product_id, Utc::now());
        tracing::info!(user_id = %user_id, product_id = %product_id, "item removed from cart");
        cart.clone()
    }

    /// Empty the cart, keeping its id and owner.
    pub fn clear_cart(&self, user_id: &UserId) -> Cart {
        let shared = self.get_or_create_cart(user_id);
        let mut cart = lock(&shared);
        cart.clear(Utc::now());
        tracing::info!(user_id = %user_id, "cart cleared");
        cart.clone()
    }

    fn existing(&self, user_id: &UserId) -> Option<SharedCart> {
        self.carts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }
}

// Cart mutators validate before changing anything, so a poisoned cart is still consistent.
fn lock(cart: &SharedCart) -> MutexGuard<'_, Cart> {
    cart.lock().unwrap_or_else(PoisonError::into_inner)
}
