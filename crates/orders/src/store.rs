//! Per-user order history.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use storefront_core::{DomainError, DomainResult, OrderId, UserId};

use crate::order::{NewOrder, Order, OrderStatus};

/// In-memory order records keyed by user. Orders never move between users.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: RwLock<HashMap<UserId, Vec<Order>>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a new pending order for `user_id`.
    pub fn create_order(&self, user_id: &UserId, new_order: NewOrder) -> DomainResult<Order> {
        let order = Order::place(user_id.clone(), new_order, Utc::now()).inspect_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "order rejected");
        })?;

        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id.clone())
            .or_default()
            .push(order.clone());

        tracing::info!(
            user_id = %user_id,
            order_id = %order.id,
            items = order.items.len(),
            total_amount = order.total_amount,
            "order created"
        );
        Ok(order)
    }

    /// The user's orders, newest first. Unknown users have none.
    pub fn get_user_orders(&self, user_id: &UserId) -> Vec<Order> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        let mut list = orders.get(user_id).cloned().unwrap_or_default();
        // Insertion order is creation order; stable reverse keeps ties deterministic.
        list.reverse();
        list.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        list
    }

    pub fn get_order(&self, user_id: &UserId, order_id: &OrderId) -> DomainResult<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .and_then(|list| list.iter().find(|o| &o.id == order_id))
            .cloned()
            .ok_or_else(|| DomainError::not_found("order"))
    }

    pub fn update_order_status(
        &self,
        user_id: &UserId,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> DomainResult<Order> {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let order = orders
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|o| &o.id == order_id))
            .ok_or_else(|| DomainError::not_found("order"))?;

        let previous = order.status;
        order.set_status(status, Utc::now());

        tracing::info!(
            user_id = %user_id,
            order_id = %order_id,
            from = ?previous,
            to = ?status,
            "order status updated"
        );
        Ok(order.clone())
    }
}
