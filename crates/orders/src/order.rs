use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use storefront_catalog::ProductId;
use storefront_core::{DomainError, DomainResult, Entity, OrderId, UserId, ValueObject, money};

/// Days between placing an order and its estimated delivery.
pub const DELIVERY_DAYS: i64 = 5;

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ValueObject for Address {}

impl Address {
    fn validate(&self, which: &str) -> DomainResult<()> {
        for (field, value) in [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{which}.{field} is required")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    CreditCard,
    DebitCard,
    Paypal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ValueObject for PaymentMethod {}

/// Line of a checkout payload: a product snapshot plus quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub data_ai_hint: String,
    pub quantity: i64,
}

/// Order line as stored.
pub type OrderItem = NewOrderItem;

/// Checkout payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub payment_method: PaymentMethod,
}

impl NewOrder {
    pub fn validate(&self) -> DomainResult<()> {
        if self.items.is_empty() {
            return Err(DomainError::validation("order must contain at least one item"));
        }

        for (idx, item) in self.items.iter().enumerate() {
            if item.id.as_str().trim().is_empty() {
                return Err(DomainError::validation(format!("items[{idx}].id is required")));
            }
            if item.name.trim().is_empty() {
                return Err(DomainError::validation(format!("items[{idx}].name is required")));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(DomainError::validation(format!(
                    "items[{idx}].price must not be negative"
                )));
            }
            if item.quantity <= 0 {
                return Err(DomainError::validation(format!(
                    "items[{idx}].quantity must be positive"
                )));
            }
        }

        self.shipping_address.validate("shippingAddress")?;
        self.billing_address.validate("billingAddress")?;

        if let Some(last4) = &self.payment_method.last4 {
            if last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()) {
                return Err(DomainError::validation("paymentMethod.last4 must be four digits"));
            }
        }

        Ok(())
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub payment_method: PaymentMethod,
    pub order_date: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Validate `new_order` and price it into a pending order.
    pub fn place(user_id: UserId, new_order: NewOrder, now: DateTime<Utc>) -> DomainResult<Self> {
        new_order.validate()?;

        let total_amount = money::line_total(new_order.items.iter().map(|i| (i.price, i.quantity)));

        Ok(Self {
            id: OrderId::new(),
            user_id,
            items: new_order.items,
            total_amount,
            status: OrderStatus::Pending,
            shipping_address: new_order.shipping_address,
            billing_address: new_order.billing_address,
            payment_method: new_order.payment_method,
            order_date: now,
            estimated_delivery: now + Duration::days(DELIVERY_DAYS),
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = self.updated_at.max(now);
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn address() -> Address {
        Address {
            street: "123 Main St".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            country: "USA".to_string(),
        }
    }

    pub(crate) fn item(id: &str, price: f64, quantity: i64) -> NewOrderItem {
        NewOrderItem {
            id: ProductId::new(id),
            name: "Organic Apples".to_string(),
            price,
            description: "Fresh organic apples".to_string(),
            image: "https://example.com/apple.jpg".to_string(),
            data_ai_hint: "apples fruit".to_string(),
            quantity,
        }
    }

    pub(crate) fn new_order(items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            items,
            shipping_address: address(),
            billing_address: address(),
            payment_method: PaymentMethod {
                kind: PaymentKind::CreditCard,
                last4: Some("4242".to_string()),
                brand: Some("Visa".to_string()),
            },
        }
    }

    fn user() -> UserId {
        UserId::parse("user-123").unwrap()
    }

    #[test]
    fn place_prices_and_schedules_delivery() {
        let now = Utc::now();
        let order = Order::place(user(), new_order(vec![item("prod-1", 3.99, 2)]), now).unwrap();

        assert_eq!(order.total_amount, 7.98);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.order_date, now);
        assert_eq!(order.estimated_delivery - order.order_date, Duration::days(5));
    }

    #[test]
    fn totals_are_rounded_to_cents() {
        let now = Utc::now();
        let order = Order::place(user(), new_order(vec![item("p", 10.99, 3)]), now).unwrap();
        assert_eq!(order.total_amount, 32.97);

        let order = Order::place(user(), new_order(vec![item("p", 0.01, 1)]), now).unwrap();
        assert_eq!(order.total_amount, 0.01);

        let items = (0..100).map(|i| item(&format!("p{i}"), 9.99, 1)).collect();
        let order = Order::place(user(), new_order(items), now).unwrap();
        assert_eq!(order.items.len(), 100);
        assert_eq!(order.total_amount, 999.00);
    }

    #[test]
    fn rejects_invalid_payloads() {
        let cases: Vec<(&str, NewOrder)> = vec![
            ("empty items", new_order(vec![])),
            ("negative price", new_order(vec![item("p", -10.99, 1)])),
            ("zero quantity", new_order(vec![item("p", 3.99, 0)])),
            ("negative quantity", new_order(vec![item("p", 3.99, -5)])),
            ("blank id", new_order(vec![item(" ", 3.99, 1)])),
            ("incomplete address", {
                let mut o = new_order(vec![item("p", 3.99, 1)]);
                o.shipping_address.city.clear();
                o
            }),
            ("bad last4", {
                let mut o = new_order(vec![item("p", 3.99, 1)]);
                o.payment_method.last4 = Some("42a".to_string());
                o
            }),
        ];

        for (name, payload) in cases {
            let err = Order::place(user(), payload, Utc::now()).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{name}: {err:?}");
        }
    }

    #[test]
    fn unknown_payment_type_fails_to_deserialize() {
        let json = serde_json::json!({ "type": "invalid_payment_type", "last4": "1234" });
        assert!(serde_json::from_value::<PaymentMethod>(json).is_err());

        let json = serde_json::json!({ "type": "paypal" });
        let pm: PaymentMethod = serde_json::from_value(json).unwrap();
        assert_eq!(pm.kind, PaymentKind::Paypal);
    }

    #[test]
    fn unicode_names_survive_round_trip_to_json() {
        let mut line = item("p", 1.0, 1);
        line.name = "Café ☕ Laptop 中文 العربية".to_string();
        let order = Order::place(user(), new_order(vec![line]), Utc::now()).unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["items"][0]["name"], "Café ☕ Laptop 中文 العربية");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["paymentMethod"]["type"], "credit_card");
        assert!(json.get("estimatedDelivery").is_some());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the order total equals the cent-rounded sum of its lines.
            #[test]
            fn total_matches_lines(lines in proptest::collection::vec((0u32..100_000, 1i64..50), 1..30)) {
                let items = lines
                    .iter()
                    .enumerate()
                    .map(|(i, (cents, qty))| item(&format!("p{i}"), f64::from(*cents) / 100.0, *qty))
                    .collect();
                let order = Order::place(user(), new_order(items), Utc::now()).unwrap();

                let expected_cents: i64 = lines.iter().map(|(c, q)| i64::from(*c) * q).sum();
                prop_assert_eq!(order.total_amount, expected_cents as f64 / 100.0);
            }
        }
    }
}
