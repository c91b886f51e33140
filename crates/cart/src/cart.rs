use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_catalog::{Product, ProductId};
use storefront_core::{CartId, Entity, UserId, ValueObject, money};

use crate::error::CartError;

/// Product snapshot plus quantity.
///
/// Name, price and the descriptive fields are copied when the product is first
/// added and never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price at add-time.
    pub price: f64,
    pub description: String,
    pub image: String,
    pub data_ai_hint: String,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    fn snapshot(product: &Product, quantity: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            image: product.image.clone(),
            data_ai_hint: product.data_ai_hint.clone(),
            quantity,
            added_at: now,
        }
    }
}

/// Aggregate totals of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total_items: i64,
    pub total_amount: f64,
    /// Number of distinct products (not total quantity).
    pub item_count: usize,
}

impl ValueObject for CartSummary {}

/// A user's cart.
///
/// Invariants (re-established by every mutator):
/// - `items` holds at most one entry per product id, in first-add order
/// - `total_items` is the sum of item quantities
/// - `total_amount` is the cent-rounded sum of `price * quantity`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    id: CartId,
    user_id: UserId,
    items: Vec<CartItem>,
    total_items: i64,
    total_amount: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Cart {
    /// Empty cart for `user_id`.
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: CartId::new(),
            user_id,
            items: Vec::new(),
            total_items: 0,
            total_amount: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_typed(&self) -> CartId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == product_id)
    }

    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            total_items: self.total_items,
            total_amount: self.total_amount,
            item_count: self.items.len(),
        }
    }

    /// Add `quantity` of `product`: sums into an existing entry, appends otherwise.
    ///
    /// A zero quantity is stored as-is. Fails without touching the cart if the
    /// resulting quantity would be negative or the cart total would overflow.
    pub(crate) fn add(
        &mut self,
        product: &Product,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> Result<(), CartError> {
        let invalid = || CartError::InvalidQuantity {
            product_id: product.id.clone(),
            quantity,
        };

        let existing = self.items.iter().position(|i| i.id == product.id);
        let next = match existing {
            Some(pos) => self.items[pos]
                .quantity
                .checked_add(quantity)
                .ok_or_else(invalid)?,
            None => quantity,
        };
        if next < 0 {
            return Err(invalid());
        }
        self.total_items_with(&product.id, next).ok_or_else(invalid)?;

        match existing {
            Some(pos) => self.items[pos].quantity = next,
            None => self.items.push(CartItem::snapshot(product, next, now)),
        }

        self.recompute();
        self.touch(now);
        Ok(())
    }

    /// Set the quantity of an existing entry; `quantity <= 0` removes it.
    pub(crate) fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> Result<(), CartError> {
        let pos = self
            .items
            .iter()
            .position(|i| &i.id == product_id)
            .ok_or_else(|| CartError::ItemNotFound(product_id.clone()))?;

        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.total_items_with(product_id, quantity)
                .ok_or_else(|| CartError::InvalidQuantity {
                    product_id: product_id.clone(),
                    quantity,
                })?;
            self.items[pos].quantity = quantity;
        }

        self.recompute();
        self.touch(now);
        Ok(())
    }

    /// Drop the entry for `product_id` if present.
    pub(crate) fn remove(&mut self, product_id: &ProductId, now: DateTime<Utc>) {
        self.items.retain(|i| &i.id != product_id);
        self.recompute();
        self.touch(now);
    }

    pub(crate) fn clear(&mut self, now: DateTime<Utc>) {
        self.items.clear();
        self.recompute();
        self.touch(now);
    }

    /// Total quantity if `product_id` held `quantity`, or `None` on overflow.
    fn total_items_with(&self, product_id: &ProductId, quantity: i64) -> Option<i64> {
        self.items
            .iter()
            .filter(|i| &i.id != product_id)
            .try_fold(quantity, |acc, i| acc.checked_add(i.quantity))
    }

    // Callers check `total_items_with` first, so the sum cannot overflow.
    fn recompute(&mut self) {
        self.total_items = self.items.iter().map(|i| i.quantity).sum();
        self.total_amount = money::line_total(self.items.iter().map(|i| (i.price, i.quantity)));
    }

    // Never moves backwards, even if the wall clock does.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }
}

impl Entity for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::product;

    fn user() -> UserId {
        UserId::parse("user-123").unwrap()
    }

    fn empty_cart() -> Cart {
        Cart::new(user(), Utc::now())
    }

    fn assert_totals_consistent(cart: &Cart) {
        let qty: i64 = cart.items().iter().map(|i| i.quantity).sum();
        let amount = money::line_total(cart.items().iter().map(|i| (i.price, i.quantity)));
        assert_eq!(cart.total_items(), qty);
        assert_eq!(cart.total_amount(), amount);
    }

    #[test]
    fn new_cart_is_empty_with_zero_totals() {
        let now = Utc::now();
        let cart = Cart::new(user(), now);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), 0.0);
        assert_eq!(cart.created_at(), now);
        assert_eq!(cart.updated_at(), now);
    }

    #[test]
    fn add_sums_quantities_and_keeps_first_snapshot() {
        let mut cart = empty_cart();
        let original = product("product-1", 10.99);
        cart.add(&original, 2, Utc::now()).unwrap();

        let mut repriced = original.clone();
        repriced.price = 99.0;
        repriced.name = "Renamed".to_string();
        cart.add(&repriced, 3, Utc::now()).unwrap();

        assert_eq!(cart.items().len(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.quantity, 5);
        assert_eq!(item.price, 10.99);
        assert_eq!(item.name, original.name);
        assert_eq!(cart.total_amount(), 54.95);
    }

    #[test]
    fn zero_quantity_add_is_stored_literally() {
        let mut cart = empty_cart();
        cart.add(&product("prod-1", 10.99), 0, Utc::now()).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 0);
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), 0.0);
    }

    #[test]
    fn negative_add_that_underflows_is_rejected_without_change() {
        let mut cart = empty_cart();
        let p = product("product-1", 10.99);
        cart.add(&p, 1, Utc::now()).unwrap();
        let before = cart.clone();

        let err = cart.add(&p, -2, Utc::now()).unwrap_err();
        assert!(matches!(err, CartError::InvalidQuantity { quantity: -2, .. }));
        assert_eq!(cart, before);

        let err = cart.add(&product("other", 1.0), -1, Utc::now()).unwrap_err();
        assert!(matches!(err, CartError::InvalidQuantity { .. }));
        assert_eq!(cart, before);
    }

    #[test]
    fn items_keep_first_add_order() {
        let mut cart = empty_cart();
        for id in ["c", "a", "b"] {
            cart.add(&product(id, 1.0), 1, Utc::now()).unwrap();
        }
        cart.add(&product("a", 1.0), 1, Utc::now()).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn set_quantity_non_positive_removes_entry() {
        for qty in [0, -1] {
            let mut cart = empty_cart();
            let p = product("product-1", 10.99);
            cart.add(&p, 2, Utc::now()).unwrap();
            cart.set_quantity(&p.id, qty, Utc::now()).unwrap();
            assert!(cart.items().is_empty());
            assert_totals_consistent(&cart);
        }
    }

    #[test]
    fn set_quantity_on_absent_item_is_item_not_found() {
        let mut cart = empty_cart();
        let before = cart.clone();
        let missing = ProductId::new("non-existent-id");
        let err = cart.set_quantity(&missing, 5, Utc::now()).unwrap_err();
        assert_eq!(err, CartError::ItemNotFound(missing));
        assert_eq!(cart, before);
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let now = Utc::now();
        let mut cart = Cart::new(user(), now);
        let earlier = now - chrono::Duration::seconds(30);
        cart.clear(earlier);
        assert_eq!(cart.updated_at(), now);
        assert_eq!(cart.created_at(), now);
    }

    #[test]
    fn add_that_would_overflow_cart_total_is_rejected_untouched() {
        let mut cart = empty_cart();
        cart.add(&product("a", 1.0), i64::MAX, Utc::now()).unwrap();
        let before = cart.clone();

        let err = cart.add(&product("b", 1.0), 1, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            CartError::InvalidQuantity { product_id: ProductId::new("b"), quantity: 1 }
        );
        assert_eq!(cart, before);
        assert_eq!(cart.items().len(), 1);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn set_quantity_that_would_overflow_cart_total_is_rejected_untouched() {
        let mut cart = empty_cart();
        cart.add(&product("a", 1.0), 5, Utc::now()).unwrap();
        cart.add(&product("b", 1.0), 1, Utc::now()).unwrap();
        let before = cart.clone();

        let err = cart
            .set_quantity(&ProductId::new("b"), i64::MAX, Utc::now())
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidQuantity { .. }));
        assert_eq!(cart, before);

        // The line itself may still go to the largest total that fits.
        cart.set_quantity(&ProductId::new("b"), i64::MAX - 5, Utc::now())
            .unwrap();
        assert_eq!(cart.total_items(), i64::MAX);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn serializes_with_camel_case_contract() {
        let mut cart = empty_cart();
        cart.add(&product("product-1", 10.99), 3, Utc::now()).unwrap();
        let json = serde_json::to_value(&cart).unwrap();

        for key in ["id", "userId", "items", "totalItems", "totalAmount", "createdAt", "updatedAt"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["totalAmount"], serde_json::json!(32.97));
        assert_eq!(json["items"][0]["dataAiHint"], "test product hint");
        assert!(json["items"][0].get("addedAt").is_some());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize, i64),
            Set(usize, i64),
            Remove(usize),
            Clear,
        }

        const PRICES: [f64; 7] = [10.99, 25.50, 5.00, 0.07, 0.1, 15.97, 7.03];

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0..PRICES.len(), 0i64..20).prop_map(|(p, q)| Op::Add(p, q)),
                2 => (0..PRICES.len(), -2i64..20).prop_map(|(p, q)| Op::Set(p, q)),
                1 => (0..PRICES.len()).prop_map(Op::Remove),
                1 => Just(Op::Clear),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: totals always match the items actually present, ids stay unique,
            /// and no entry is ever left with a negative quantity.
            #[test]
            fn totals_track_items_after_every_mutation(ops in proptest::collection::vec(op(), 1..40)) {
                let products: Vec<Product> = PRICES
                    .iter()
                    .enumerate()
                    .map(|(i, price)| product(&format!("p{i}"), *price))
                    .collect();
                let mut cart = empty_cart();
                let created = cart.created_at();
                let id = cart.id_typed();

                for op in ops {
                    match op {
                        Op::Add(p, q) => cart.add(&products[p], q, Utc::now()).unwrap(),
                        Op::Set(p, q) => {
                            let _ = cart.set_quantity(&products[p].id, q, Utc::now());
                        }
                        Op::Remove(p) => cart.remove(&products[p].id, Utc::now()),
                        Op::Clear => cart.clear(Utc::now()),
                    }

                    let qty: i64 = cart.items().iter().map(|i| i.quantity).sum();
                    let amount = money::line_total(cart.items().iter().map(|i| (i.price, i.quantity)));
                    prop_assert_eq!(cart.total_items(), qty);
                    prop_assert_eq!(cart.total_amount(), amount);
                    prop_assert!(cart.items().iter().all(|i| i.quantity >= 0));

                    let mut ids: Vec<&ProductId> = cart.items().iter().map(|i| &i.id).collect();
                    ids.sort();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), cart.items().len());

                    prop_assert_eq!(cart.created_at(), created);
                    prop_assert_eq!(cart.id_typed(), id);
                    prop_assert!(cart.updated_at() >= created);
                }
            }
        }
    }
}
