use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_orders::OrderStatus;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /cart/:userId/items`. Fields are optional so a missing
/// `productId` can be reported as bad request data rather than a parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}
