use anyhow::Context;

use storefront_api::{ApiConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    storefront_observability::init(config.log_format);

    let services = app::services::AppServices::from_config(&config)?;
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        service = %config.service_name,
        product_service = config.product_service_url.as_deref().unwrap_or("in-process"),
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
