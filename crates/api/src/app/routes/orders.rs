use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use storefront_core::OrderId;
use storefront_orders::NewOrder;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:user_id", post(create_order).get(list_orders))
        .route("/:user_id/:order_id", get(get_order))
        .route("/:user_id/:order_id/status", put(update_status))
}

fn order_not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "ORDER_NOT_FOUND", "Order not found")
}

/// Place an order, then empty the user's cart.
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
    body: Result<Json<NewOrder>, JsonRejection>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected order body");
            return errors::invalid_order();
        }
    };

    let order = match services.orders.create_order(&user_id, body) {
        Ok(o) => o,
        Err(e) => return errors::order_error_to_response(e),
    };
    services.carts.clear_cart(&user_id);

    (StatusCode::CREATED, Json(order)).into_response()
}

#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    (StatusCode::OK, Json(services.orders.get_user_orders(&user_id))).into_response()
}

#[tracing::instrument(skip_all, fields(user_id = %user_id, order_id = %order_id))]
pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path((user_id, order_id)): Path<(String, String)>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    // An id that does not parse cannot name an existing order.
    let order_id: OrderId = match order_id.parse() {
        Ok(v) => v,
        Err(_) => return order_not_found(),
    };

    match services.orders.get_order(&user_id, &order_id) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::order_error_to_response(e),
    }
}

#[tracing::instrument(skip_all, fields(user_id = %user_id, order_id = %order_id))]
pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path((user_id, order_id)): Path<(String, String)>,
    body: Result<Json<dto::UpdateStatusRequest>, JsonRejection>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let order_id: OrderId = match order_id.parse() {
        Ok(v) => v,
        Err(_) => return order_not_found(),
    };
    let status = match body {
        Ok(Json(b)) => b.status,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected status body");
            return errors::invalid_request();
        }
    };

    match services
        .orders
        .update_order_status(&user_id, &order_id, status)
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::order_error_to_response(e),
    }
}
