use axum::{routing::get, Router};

pub mod cart;
pub mod orders;
pub mod products;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/cart", cart::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
}
