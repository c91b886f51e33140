use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};
use chrono::Utc;

use crate::app::dto::HealthResponse;
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: services.service_name.clone(),
        timestamp: Utc::now(),
    })
}

pub async fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found")
}
