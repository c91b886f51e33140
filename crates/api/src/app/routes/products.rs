use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use storefront_catalog::{NewProduct, ProductId, ProductQuery};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected product query");
            return errors::invalid_request();
        }
    };

    (StatusCode::OK, Json(services.catalog.list(&query))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.catalog.get(&ProductId::new(id)) {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND", "Product not found"),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected product body");
            return errors::invalid_request();
        }
    };

    match services.catalog.create(body) {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "product rejected");
            errors::invalid_request()
        }
    }
}
