//! Orders domain module.
//!
//! Validates checkout payloads and keeps the resulting order records in
//! memory, per user.

pub mod order;
pub mod store;

pub use order::{
    Address, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, PaymentKind, PaymentMethod,
};
pub use store::OrderStore;
