use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use storefront_catalog::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:user_id", get(get_cart).delete(clear_cart))
        .route("/:user_id/summary", get(get_cart_summary))
        .route("/:user_id/items", post(add_item))
        .route("/:user_id/items/:product_id", put(update_item).delete(remove_item))
}

#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    (StatusCode::OK, Json(services.carts.get_cart(&user_id))).into_response()
}

#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn get_cart_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    (StatusCode::OK, Json(services.carts.get_cart_summary(&user_id))).into_response()
}

#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
    body: Result<Json<dto::AddItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected add-to-cart body");
            return errors::invalid_request();
        }
    };

    let product_id = match body.product_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => ProductId::new(id),
        _ => return errors::invalid_request(),
    };
    if body.quantity.is_some_and(|q| q <= 0) {
        return errors::invalid_request();
    }

    match services
        .carts
        .add_to_cart(&user_id, &product_id, body.quantity)
        .await
    {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(e) => errors::cart_error_to_response(e),
    }
}

#[tracing::instrument(skip_all, fields(user_id = %user_id, product_id = %product_id))]
pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((user_id, product_id)): Path<(String, String)>,
    body: Result<Json<dto::UpdateItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let quantity = match body {
        Ok(Json(dto::UpdateItemRequest { quantity: Some(q) })) => q,
        Ok(_) => return errors::invalid_request(),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected cart update body");
            return errors::invalid_request();
        }
    };

    match services
        .carts
        .update_cart_item(&user_id, &ProductId::new(product_id), quantity)
    {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(e) => errors::cart_error_to_response(e),
    }
}

#[tracing::instrument(skip_all, fields(user_id = %user_id, product_id = %product_id))]
pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((user_id, product_id)): Path<(String, String)>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let cart = services
        .carts
        .remove_from_cart(&user_id, &ProductId::new(product_id));
    (StatusCode::OK, Json(cart)).into_response()
}

#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn clear_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&user_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    (StatusCode::OK, Json(services.carts.clear_cart(&user_id))).into_response()
}
