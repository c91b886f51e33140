use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use storefront_cart::CartError;
use storefront_core::{DomainError, UserId};

pub const INVALID_REQUEST: &str = "Invalid request data";
pub const INVALID_ORDER: &str = "Invalid order data";

/// `{"error": message, "code": code}` with the given status.
pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}

pub fn invalid_request() -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", INVALID_REQUEST)
}

pub fn invalid_order() -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "INVALID_ORDER", INVALID_ORDER)
}

pub fn parse_user_id(raw: &str) -> Result<UserId, axum::response::Response> {
    UserId::parse(raw)
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "INVALID_USER_ID", "Invalid user ID"))
}

pub fn cart_error_to_response(err: CartError) -> axum::response::Response {
    match &err {
        CartError::ProductNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND", err.to_string())
        }
        CartError::ItemNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "ITEM_NOT_FOUND", err.to_string())
        }
        CartError::InvalidQuantity { .. } => invalid_request(),
        CartError::Lookup(e) => {
            tracing::error!(error = %e, "product lookup failed");
            json_error(
                StatusCode::BAD_GATEWAY,
                "PRODUCT_SERVICE_UNAVAILABLE",
                "Product service unavailable",
            )
        }
    }
}

/// Map an order-store failure. Validation failures are reported as bad order data.
pub fn order_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(_) => invalid_order(),
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "ORDER_NOT_FOUND", "Order not found"),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "INVALID_ID", msg),
    }
}
